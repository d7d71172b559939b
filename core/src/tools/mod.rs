pub mod registry;
pub mod traits;
pub mod vapi;

// Re-export common types
pub use registry::ToolRegistry;
pub use traits::{parse_arguments, Tool};
pub use vapi::{vapi_tools, FindAssistantTool, GetPhoneNumberTool, ListAssistantsTool, MakeCallTool};
