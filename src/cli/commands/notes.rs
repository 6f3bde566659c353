use crate::cli::OutputFormat;
use crate::database::{NoteStore, PgStore};

pub async fn list(store: &PgStore, username: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no user named '{}'", username))?;
    let notes = store.list_notes_by_author(user.id).await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&notes)?),
        OutputFormat::Text => {
            if notes.is_empty() {
                println!("{} has no notes", user.username);
            }
            for note in notes {
                println!("{:>6}  {:<32}  {}", note.id, note.slug, note.title);
            }
        }
    }
    Ok(())
}
