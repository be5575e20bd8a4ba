//! Notes command implementation

use crate::cli::output::{format_notes_json, format_notes_table};
use crate::cli::NotesCommands;
use crate::notes::{NewNote, NotesClient};
use chrono::Utc;

/// Handle `notedeck notes ...`
pub async fn handle_notes(
    command: &NotesCommands,
    client: &NotesClient,
) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        NotesCommands::List(args) => {
            let notes = client.list_notes().await?;
            if args.json {
                Ok(format_notes_json(&notes)?)
            } else {
                Ok(format_notes_table(&notes))
            }
        }
        NotesCommands::Add(args) => {
            let note = NewNote::new(&args.title, &args.content).with_user_id(args.user_id);
            client.create_note(&note).await?;
            Ok(format!("✓ Note created: {}", args.title))
        }
        NotesCommands::Edit(args) => {
            if args.title.is_none() && args.content.is_none() {
                return Err("nothing to change; pass --title and/or --content".into());
            }

            // PUT carries the full note, so start from the server's copy
            let mut note = client
                .list_notes()
                .await?
                .into_iter()
                .find(|n| n.id == args.id)
                .ok_or_else(|| format!("note {} not found", args.id))?;

            if let Some(title) = &args.title {
                note.title = title.clone();
            }
            if let Some(content) = &args.content {
                note.content = content.clone();
            }
            note.updated_at = Utc::now();

            client.update_note(&note).await?;
            Ok(format!("✓ Note {} updated", note.id))
        }
        NotesCommands::Delete(args) => {
            client.delete_note(args.id).await?;
            Ok(format!("✓ Note {} deleted", args.id))
        }
    }
}
