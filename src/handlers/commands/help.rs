//! Help command handler

use crate::messenger::Markup;
use crate::state::AppContext;
use crate::texts;
use crate::utils::errors::Result;
use crate::handlers::{reply, Sender};

/// Handle /help command
pub async fn handle_help(app: &AppContext, sender: &Sender) -> Result<()> {
    reply(app, sender, texts::HELP, Markup::None).await
}
