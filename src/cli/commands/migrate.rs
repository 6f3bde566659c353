use crate::database::PgStore;

pub async fn handle(store: &PgStore) -> anyhow::Result<()> {
    store.migrate().await?;
    println!("Schema is up to date");
    Ok(())
}
