//! Vapi tools
//!
//! Each tool wraps one operation against the Vapi REST API and always
//! answers with an [`Envelope`](crate::envelope::Envelope).

pub mod find_assistant;
pub mod get_phone_number;
pub mod list_assistants;
pub mod make_call;

pub use find_assistant::FindAssistantTool;
pub use get_phone_number::GetPhoneNumberTool;
pub use list_assistants::ListAssistantsTool;
pub use make_call::{CallRequest, MakeCallTool};

use crate::client::VapiClient;
use crate::tools::Tool;
use std::sync::Arc;

/// All Vapi tools sharing one client
pub fn vapi_tools(client: Arc<VapiClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(MakeCallTool::new(Arc::clone(&client))),
        Arc::new(GetPhoneNumberTool::new(Arc::clone(&client))),
        Arc::new(ListAssistantsTool::new(Arc::clone(&client))),
        Arc::new(FindAssistantTool::new(client)),
    ]
}
