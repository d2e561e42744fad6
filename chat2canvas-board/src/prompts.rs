//! Prompt texts for AI-assisted planning.
//!
//! Users paste these into an AI chat. The assistant answers with Canvas
//! Code, which goes back in through [`crate::BoardStore::import_project`].

use crate::auto_color::PALETTE;
use crate::codec::{to_canvas_code, CanvasProject};
use crate::error::Result;
use crate::types::Project;

const FORMAT_EXAMPLE: &str = r##"{
  "name": "Project Name",
  "columns": [
    {
      "title": "Phase Name",
      "color": "#e0f2fe",
      "cards": [
        {
          "title": "Task Name",
          "color": "#dcfce7",
          "tasks": [
            { "text": "Subtask description", "done": false }
          ]
        }
      ]
    }
  ]
}"##;

fn palette_list() -> String {
    PALETTE.join(", ")
}

/// Instructions that turn an AI assistant into a Canvas Code generator
pub fn creator_prompt() -> String {
    format!(
        "You are a project planning assistant for Chat2Canvas.\n\
         \n\
         Break the user's project into phases (columns), work items (cards) and \
         checklist steps (tasks). If the project has already been described in this \
         conversation, convert it to Canvas Code right away. Otherwise ask: \
         \"What project are we planning?\"\n\
         \n\
         When you output Canvas Code:\n\
         - First say: \"You can copy the code below to Chat2Canvas:\"\n\
         - Then output a single JSON object that starts with {{ and ends with }}\n\
         - Write nothing after the closing brace\n\
         \n\
         Rules:\n\
         - Never include \"id\" or \"number\" fields\n\
         - Use only these colors: {palette}\n\
         - \"tasks\" is always an array (use [] when empty)\n\
         \n\
         Format:\n\
         {example}",
        palette = palette_list(),
        example = FORMAT_EXAMPLE,
    )
}

/// Short reminder asking the assistant to answer in strict Canvas Code
pub fn reminder_prompt() -> String {
    format!(
        "Please return the updated project plan as Canvas Code in exactly this format:\n\
         \n\
         {example}\n\
         \n\
         Rules:\n\
         1. Return only the raw JSON object.\n\
         2. No introduction, no markdown code fences, no closing remarks.\n\
         3. Do not include \"id\" or \"number\" fields.\n\
         4. Use only these colors: {palette}.",
        example = FORMAT_EXAMPLE,
        palette = palette_list(),
    )
}

/// Message sharing a project's current state with an assistant for review
pub fn sync_message(project: &Project) -> Result<String> {
    let code = to_canvas_code(&CanvasProject::from_project(project))?;
    Ok(format!(
        "Here is my current project progress for \"{name}\":\n\n{code}\n\n\
         Review it and suggest improvements. Return updated Canvas Code in the same format.",
        name = project.name,
        code = code,
    ))
}
