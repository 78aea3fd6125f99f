//! Turns driven through the real local tools.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use toolpilot_application::{
    ReasoningContext, ReasoningEngine, ReasoningError, ReasoningStep, RunTurnInput,
    RunTurnUseCase, TurnError,
};
use toolpilot_domain::{BaseDirectory, ConversationStore, ToolCall, TurnBound, TurnLimits};
use toolpilot_infrastructure::LocalToolExecutor;

/// Engine that replays a fixed script, then answers with the last observation.
struct ScriptedEngine {
    steps: Mutex<VecDeque<ReasoningStep>>,
}

impl ScriptedEngine {
    fn new(steps: Vec<ReasoningStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
        }
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    async fn next_step(
        &self,
        context: ReasoningContext<'_>,
    ) -> Result<ReasoningStep, ReasoningError> {
        if let Some(step) = self.steps.lock().unwrap().pop_front() {
            return Ok(step);
        }
        let last = context
            .scratchpad
            .last()
            .map(|e| e.observation.clone())
            .unwrap_or_default();
        Ok(ReasoningStep::FinalAnswer(last))
    }
}

fn tool(name: &str, args: &[(&str, &str)]) -> ReasoningStep {
    let call = args
        .iter()
        .fold(ToolCall::new(name), |call, (k, v)| call.with_arg(*k, *v));
    ReasoningStep::ToolRequest(call)
}

#[tokio::test]
async fn test_write_then_read_in_one_turn() {
    let dir = TempDir::new().unwrap();
    let base = BaseDirectory::new(dir.path()).unwrap();
    let engine = ScriptedEngine::new(vec![
        tool("write_file", &[("path", "a.txt"), ("content", "hello")]),
        tool("read_file", &[("path", "a.txt")]),
    ]);
    let use_case = RunTurnUseCase::new(Arc::new(engine), Arc::new(LocalToolExecutor::new(base)));

    let mut store = ConversationStore::new();
    let output = use_case
        .execute(
            RunTurnInput::new("save and show"),
            &mut store,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(output.answer.contains("hello"));
    assert_eq!(output.iterations, 2);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_escape_attempt_becomes_observation() {
    let dir = TempDir::new().unwrap();
    let base = BaseDirectory::new(dir.path()).unwrap();
    let engine = ScriptedEngine::new(vec![tool("read_file", &[("path", "../../etc/passwd")])]);
    let use_case = RunTurnUseCase::new(Arc::new(engine), Arc::new(LocalToolExecutor::new(base)));

    let mut store = ConversationStore::new();
    let output = use_case
        .execute(
            RunTurnInput::new("peek"),
            &mut store,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(output.answer.starts_with("Error:"), "{}", output.answer);
    assert!(!output.answer.contains("root:"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_cancel_kills_running_shell_command() {
    let dir = TempDir::new().unwrap();
    let base = BaseDirectory::new(dir.path()).unwrap();
    let engine = ScriptedEngine::new(vec![tool(
        "execute_shell_command",
        &[("command", "echo $$ > shell.pid; sleep 30")],
    )]);
    let use_case = RunTurnUseCase::new(Arc::new(engine), Arc::new(LocalToolExecutor::new(base)));

    let cancel = CancellationToken::new();
    let pid_file = dir.path().join("shell.pid");
    let canceller = {
        let cancel = cancel.clone();
        let pid_file = pid_file.clone();
        tokio::spawn(async move {
            for _ in 0..250 {
                if let Ok(text) = std::fs::read_to_string(&pid_file)
                    && !text.trim().is_empty()
                {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
            cancel.cancel();
        })
    };

    let mut store = ConversationStore::new();
    let started = std::time::Instant::now();
    let result = use_case
        .execute(RunTurnInput::new("run it"), &mut store, &cancel)
        .await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(TurnError::Canceled)));
    assert!(store.is_empty());
    assert!(started.elapsed() < Duration::from_secs(10));

    let pid: i32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    let mut alive = true;
    for _ in 0..100 {
        if !process_alive(pid) {
            alive = false;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(!alive, "shell {} survived cancellation", pid);
}

#[cfg(unix)]
#[tokio::test]
async fn test_time_bound_stops_shell_with_background_child() {
    let dir = TempDir::new().unwrap();
    let base = BaseDirectory::new(dir.path()).unwrap();
    let engine = ScriptedEngine::new(vec![tool(
        "execute_shell_command",
        &[("command", "sleep 20 & echo started")],
    )]);
    let limits = TurnLimits::default().with_max_execution_time(Duration::from_millis(500));
    let use_case = RunTurnUseCase::new(Arc::new(engine), Arc::new(LocalToolExecutor::new(base)))
        .with_limits(limits);

    let mut store = ConversationStore::new();
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        use_case.execute(
            RunTurnInput::new("start a server"),
            &mut store,
            &CancellationToken::new(),
        ),
    )
    .await
    .expect("time bound enforced while the background child holds stdout");

    assert!(matches!(
        result,
        Err(TurnError::BoundExceeded(TurnBound::ExecutionTime(_)))
    ));
    assert!(store.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_cancel_after_shell_exit_with_background_child() {
    let dir = TempDir::new().unwrap();
    let base = BaseDirectory::new(dir.path()).unwrap();
    let engine = ScriptedEngine::new(vec![tool(
        "execute_shell_command",
        &[("command", "sleep 20 & echo started")],
    )]);
    let use_case = RunTurnUseCase::new(Arc::new(engine), Arc::new(LocalToolExecutor::new(base)));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let mut store = ConversationStore::new();
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        use_case.execute(RunTurnInput::new("start a server"), &mut store, &cancel),
    )
    .await
    .expect("cancellation honoured while the background child holds stdout");

    assert!(matches!(result, Err(TurnError::Canceled)));
    assert!(store.is_empty());
}

/// A zombie waiting to be reaped counts as gone.
#[cfg(unix)]
fn process_alive(pid: i32) -> bool {
    if unsafe { libc::kill(pid, 0) } != 0 {
        return false;
    }
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit_once(')')
            .map(|(_, rest)| !rest.trim_start().starts_with('Z'))
            .unwrap_or(true),
        Err(_) => true,
    }
}
