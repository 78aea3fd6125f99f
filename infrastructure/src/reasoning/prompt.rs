//! Prompt construction for the JSON-blob action protocol.
//!
//! The engine is asked to reply with exactly one blob per step:
//!
//! ```json
//! {"action": "read_file", "action_input": {"path": "src/main.rs"}}
//! {"action": "Final Answer", "action_input": "The file defines ..."}
//! ```

use serde_json::{Map, Value, json};
use toolpilot_application::ReasoningContext;
use toolpilot_domain::{Message, ToolDefinition, ToolSpec};

/// Action name that ends a turn
pub const FINAL_ANSWER: &str = "Final Answer";

const REMINDER: &str =
    "(Reminder: respond with a single JSON blob containing \"action\" and \"action_input\", no matter what.)";

/// Render one tool the way it is listed in the system prompt.
fn render_tool(tool: &ToolDefinition) -> String {
    let args: Map<String, Value> = tool
        .parameters
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                json!({ "type": "string", "description": p.description }),
            )
        })
        .collect();
    format!("{}: {}, args: {}", tool.name, tool.description, Value::Object(args))
}

pub fn system_prompt(tools: &ToolSpec) -> String {
    let listing = tools.all().map(render_tool).collect::<Vec<_>>().join("\n");
    let names = tools
        .names()
        .map(|n| format!("\"{}\"", n))
        .chain(std::iter::once(format!("\"{}\"", FINAL_ANSWER)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a helpful assistant working for a developer. You can use tools to inspect \
and change files in the working directory and to run shell commands there.

You have access to the following tools:

{listing}

To use a tool, reply with a JSON blob. The \"action\" must be one of [{names}]. \
The \"action_input\" MUST be a JSON object whose keys match the tool's arguments.

```json
{{
  \"action\": \"tool_name\",
  \"action_input\": {{
    \"arg_name\": \"arg_value\"
  }}
}}
```

After each tool call you will receive an Observation with its result. When you have \
a response for the user, or do not need a tool, reply with:

```json
{{
  \"action\": \"{FINAL_ANSWER}\",
  \"action_input\": \"<your response here>\"
}}
```

Reply with exactly one JSON blob per message."
    )
}

/// The blob an assistant would have sent to make `call`.
pub fn action_blob(tool_name: &str, arguments: Value) -> String {
    let blob = json!({ "action": tool_name, "action_input": arguments });
    format!(
        "```json\n{}\n```",
        serde_json::to_string_pretty(&blob).unwrap_or_else(|_| blob.to_string())
    )
}

/// Build the full message list for one step.
///
/// Prior turns become user/assistant pairs. Scratchpad entries are replayed
/// as the assistant's action blob followed by a user `Observation:` message.
pub fn build_messages(context: &ReasoningContext<'_>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2 + context.history.len() * 2 + context.scratchpad.len() * 2);
    messages.push(Message::system(system_prompt(context.tools)));

    for turn in context.history {
        messages.push(Message::user(turn.input()));
        messages.push(Message::assistant(action_blob(
            FINAL_ANSWER,
            Value::String(turn.output().to_string()),
        )));
    }

    messages.push(Message::user(format!("{}\n\n{}", context.input, REMINDER)));

    for entry in context.scratchpad {
        if let Some(call) = &entry.call {
            messages.push(Message::assistant(action_blob(
                &call.tool_name,
                call.arguments_json(),
            )));
        }
        messages.push(Message::user(format!(
            "Observation: {}\n\n{}",
            entry.observation, REMINDER
        )));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolpilot_domain::{Role, ScratchEntry, ToolCall, Turn, builtin_tool_spec};

    #[test]
    fn test_system_prompt_lists_tools() {
        let prompt = system_prompt(&builtin_tool_spec());
        assert!(prompt.contains("read_file: Read the contents of a file"));
        assert!(prompt.contains("\"execute_shell_command\""));
        assert!(prompt.contains("\"Final Answer\""));
        assert!(prompt.contains(r#""command":{"description""#));
    }

    #[test]
    fn test_build_messages_order() {
        let spec = builtin_tool_spec();
        let history = vec![Turn::new("earlier question", "earlier answer")];
        let scratchpad = vec![
            ScratchEntry::tool(
                ToolCall::new("execute_shell_command").with_arg("command", "ls"),
                "Command succeeded:\nExit code: 0",
            ),
            ScratchEntry::malformed("Could not parse your last reply"),
        ];
        let context = ReasoningContext {
            input: "list files",
            history: &history,
            scratchpad: &scratchpad,
            tools: &spec,
        };

        let messages = build_messages(&context);
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::User,
            ]
        );
        assert!(messages[2].content.contains("earlier answer"));
        assert!(messages[3].content.starts_with("list files"));
        assert!(messages[4].content.contains("\"command\": \"ls\""));
        assert!(messages[5].content.starts_with("Observation: Command succeeded"));
        assert!(messages[6].content.starts_with("Observation: Could not parse"));
    }
}
