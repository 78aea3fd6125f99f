//! Run Turn use case
//!
//! Drives one user input to a final answer:
//!
//! ```text
//! Idle ─▶ Reasoning ─▶ (ToolPending ─▶ Reasoning)* ─▶ Finalizing ─▶ Done
//! ```
//!
//! Every await is raced against the turn's [`CancellationToken`] and the
//! wall-clock deadline. Only a turn that reaches `Finalizing` is written to
//! the [`ConversationStore`]; canceled and failed turns leave it untouched.

use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::ports::reasoning::{ReasoningContext, ReasoningEngine, ReasoningError, ReasoningStep};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::check_cancelled;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use toolpilot_domain::{
    ConversationStore, ScratchEntry, Scratchpad, Turn, TurnBound, TurnLimits, TurnPhase,
};
use tracing::{debug, info, warn};

/// Ways a turn can end without an answer
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Turn stopped: {0}")]
    BoundExceeded(TurnBound),

    #[error("Turn canceled by user")]
    Canceled,

    #[error("Reasoning engine failed: {0}")]
    CollaboratorFailure(#[from] ReasoningError),
}

impl TurnError {
    /// Check if this error represents a cancellation
    pub fn is_canceled(&self) -> bool {
        matches!(self, TurnError::Canceled)
    }
}

/// Input for a single turn
#[derive(Debug, Clone)]
pub struct RunTurnInput {
    pub input: String,
}

impl RunTurnInput {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Output of a completed turn
#[derive(Debug, Clone)]
pub struct RunTurnOutput {
    pub answer: String,
    /// Tool calls (and malformed-output retries) consumed
    pub iterations: usize,
}

/// Use case for running one turn of the agent
pub struct RunTurnUseCase<R: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> {
    engine: Arc<R>,
    tool_executor: Arc<T>,
    limits: TurnLimits,
}

impl<R, T> Clone for RunTurnUseCase<R, T>
where
    R: ReasoningEngine + 'static,
    T: ToolExecutorPort + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            tool_executor: self.tool_executor.clone(),
            limits: self.limits,
        }
    }
}

/// Tracks the current phase and reports each change.
struct PhaseTracker<'a> {
    phase: TurnPhase,
    progress: &'a dyn TurnProgressNotifier,
}

impl PhaseTracker<'_> {
    fn enter(&mut self, next: TurnPhase) {
        if self.phase == next {
            return;
        }
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal turn transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!("Turn phase: {} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
        self.progress.on_phase_change(next);
    }

    fn fail(&mut self, error: TurnError) -> TurnError {
        match &error {
            TurnError::Canceled => {
                warn!("Turn canceled");
                self.enter(TurnPhase::Canceled);
            }
            other => {
                warn!("Turn failed: {}", other);
                self.enter(TurnPhase::Failed);
            }
        }
        error
    }
}

impl<R: ReasoningEngine + 'static, T: ToolExecutorPort + 'static> RunTurnUseCase<R, T> {
    pub fn new(engine: Arc<R>, tool_executor: Arc<T>) -> Self {
        Self {
            engine,
            tool_executor,
            limits: TurnLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: TurnLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &TurnLimits {
        &self.limits
    }

    pub fn tool_executor(&self) -> &Arc<T> {
        &self.tool_executor
    }

    /// Run a turn without progress reporting
    pub async fn execute(
        &self,
        input: RunTurnInput,
        store: &mut ConversationStore,
        cancel: &CancellationToken,
    ) -> Result<RunTurnOutput, TurnError> {
        self.execute_with_progress(input, store, cancel, &NoTurnProgress)
            .await
    }

    /// Run a turn, reporting phase changes and tool activity to `progress`.
    pub async fn execute_with_progress(
        &self,
        input: RunTurnInput,
        store: &mut ConversationStore,
        cancel: &CancellationToken,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<RunTurnOutput, TurnError> {
        let deadline = Instant::now() + self.limits.max_execution_time;
        let time_bound = TurnBound::ExecutionTime(self.limits.max_execution_time);
        let history = store.snapshot();
        let tools = self.tool_executor.tool_spec();
        let mut scratchpad = Scratchpad::new();
        let mut iterations = 0usize;
        let mut tracker = PhaseTracker {
            phase: TurnPhase::Idle,
            progress,
        };

        info!(
            "Turn started (max {} iterations, {}s)",
            self.limits.max_iterations,
            self.limits.max_execution_time.as_secs()
        );

        loop {
            tracker.enter(TurnPhase::Reasoning);
            check_cancelled(cancel).map_err(|e| tracker.fail(e))?;

            let context = ReasoningContext {
                input: &input.input,
                history: &history,
                scratchpad: scratchpad.entries(),
                tools,
            };

            // Dropping the engine future aborts the in-flight request.
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(tracker.fail(TurnError::Canceled)),
                _ = sleep_until(deadline) => {
                    return Err(tracker.fail(TurnError::BoundExceeded(time_bound)));
                }
                step = self.engine.next_step(context) => step,
            };

            match step {
                Ok(ReasoningStep::FinalAnswer(answer)) => {
                    tracker.enter(TurnPhase::Finalizing);
                    store.append(Turn::new(input.input.clone(), answer.clone()));
                    tracker.enter(TurnPhase::Done);
                    info!("Turn completed after {} iterations", iterations);
                    return Ok(RunTurnOutput { answer, iterations });
                }

                Ok(ReasoningStep::ToolRequest(call)) => {
                    if iterations >= self.limits.max_iterations {
                        return Err(tracker.fail(TurnError::BoundExceeded(TurnBound::Iterations(
                            self.limits.max_iterations,
                        ))));
                    }
                    iterations += 1;
                    tracker.enter(TurnPhase::ToolPending);
                    progress.on_tool_call(&call);
                    debug!("Dispatching tool '{}' (iteration {})", call.tool_name, iterations);

                    // Cancellation reaches the tool through the child token;
                    // the tool reports it as a CANCELED result once it has
                    // stopped its work.
                    let tool_cancel = cancel.child_token();
                    let result = {
                        let execution = self.tool_executor.execute(&call, &tool_cancel);
                        tokio::pin!(execution);
                        tokio::select! {
                            biased;
                            result = &mut execution => Some(result),
                            _ = sleep_until(deadline) => {
                                tool_cancel.cancel();
                                let _ = execution.await;
                                None
                            }
                        }
                    };
                    let Some(result) = result else {
                        return Err(tracker.fail(TurnError::BoundExceeded(time_bound)));
                    };

                    if cancel.is_cancelled() {
                        return Err(tracker.fail(TurnError::Canceled));
                    }

                    progress.on_tool_result(&call, &result);
                    scratchpad.push(ScratchEntry::tool(call, result.observation()));
                }

                Err(ReasoningError::Malformed { reason, raw })
                    if self.limits.retry_malformed_output =>
                {
                    if iterations >= self.limits.max_iterations {
                        return Err(tracker.fail(TurnError::BoundExceeded(TurnBound::Iterations(
                            self.limits.max_iterations,
                        ))));
                    }
                    iterations += 1;
                    warn!("Malformed engine output, retrying: {}", reason);
                    debug!("Malformed output was: {}", raw);
                    progress.on_malformed_output(&reason);
                    scratchpad.push(ScratchEntry::malformed(format!(
                        "Could not parse your last reply: {}. Respond with a single JSON blob \
                         containing \"action\" and \"action_input\".",
                        reason
                    )));
                }

                Err(error) => return Err(tracker.fail(TurnError::CollaboratorFailure(error))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use toolpilot_domain::{ToolCall, ToolResult, ToolSpec, builtin_tool_spec};

    struct ScriptedEngine {
        steps: Mutex<Vec<Result<ReasoningStep, ReasoningError>>>,
    }

    impl ScriptedEngine {
        fn new(mut steps: Vec<Result<ReasoningStep, ReasoningError>>) -> Self {
            steps.reverse();
            Self {
                steps: Mutex::new(steps),
            }
        }
    }

    #[async_trait]
    impl ReasoningEngine for ScriptedEngine {
        async fn next_step(
            &self,
            _context: ReasoningContext<'_>,
        ) -> Result<ReasoningStep, ReasoningError> {
            self.steps
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(ReasoningStep::FinalAnswer("done".to_string())))
        }
    }

    struct EchoExecutor {
        spec: ToolSpec,
    }

    #[async_trait]
    impl ToolExecutorPort for EchoExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall, _cancel: &CancellationToken) -> ToolResult {
            ToolResult::success(&call.tool_name, format!("ran {}", call.tool_name))
        }
    }

    fn use_case(
        steps: Vec<Result<ReasoningStep, ReasoningError>>,
    ) -> RunTurnUseCase<ScriptedEngine, EchoExecutor> {
        RunTurnUseCase::new(
            Arc::new(ScriptedEngine::new(steps)),
            Arc::new(EchoExecutor {
                spec: builtin_tool_spec(),
            }),
        )
    }

    fn tool_step() -> Result<ReasoningStep, ReasoningError> {
        Ok(ReasoningStep::ToolRequest(
            ToolCall::new("execute_shell_command").with_arg("command", "ls"),
        ))
    }

    #[tokio::test]
    async fn test_final_answer_appends_turn() {
        let uc = use_case(vec![tool_step(), Ok(ReasoningStep::FinalAnswer("hi".into()))]);
        let mut store = ConversationStore::new();

        let output = uc
            .execute(RunTurnInput::new("hello"), &mut store, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.answer, "hi");
        assert_eq!(output.iterations, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.turns()[0].input(), "hello");
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let uc = use_case(vec![Err(ReasoningError::Transport("down".into()))]);
        let mut store = ConversationStore::new();

        let err = uc
            .execute(RunTurnInput::new("hello"), &mut store, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TurnError::CollaboratorFailure(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_output_retried_by_default() {
        let uc = use_case(vec![
            Err(ReasoningError::malformed("no JSON blob", "garbage")),
            Ok(ReasoningStep::FinalAnswer("ok".into())),
        ]);
        let mut store = ConversationStore::new();

        let output = uc
            .execute(RunTurnInput::new("q"), &mut store, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.iterations, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_output_fails_without_retry() {
        let uc = use_case(vec![Err(ReasoningError::malformed("no JSON blob", "garbage"))])
            .with_limits(TurnLimits::default().with_retry_malformed_output(false));
        let mut store = ConversationStore::new();

        let err = uc
            .execute(RunTurnInput::new("q"), &mut store, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TurnError::CollaboratorFailure(ReasoningError::Malformed { .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_already_canceled_token() {
        let uc = use_case(vec![]);
        let mut store = ConversationStore::new();
        let token = CancellationToken::new();
        token.cancel();

        let err = uc
            .execute(RunTurnInput::new("q"), &mut store, &token)
            .await
            .unwrap_err();

        assert!(err.is_canceled());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_zero_time_budget() {
        let uc = use_case(vec![]).with_limits(
            TurnLimits::default().with_max_execution_time(Duration::from_millis(0)),
        );
        let mut store = ConversationStore::new();

        let err = uc
            .execute(RunTurnInput::new("q"), &mut store, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TurnError::BoundExceeded(TurnBound::ExecutionTime(_))
        ));
    }
}
