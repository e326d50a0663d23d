use peopleops_api::{app, config::Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    peopleops_observability::init();

    let settings = Settings::from_env();
    let app = app::build_app(&settings)?;

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
