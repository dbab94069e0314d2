use bms_cascade::{
    errors::ConfigError,
    load_snapshot,
    models::{PageHandles, PageSnapshot, SelectOption},
    page::Page,
    resolve_config, Cascade, HttpFragmentSource, PageState,
};
use std::{env, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let group = args
        .next()
        .ok_or_else(|| ConfigError::new("usage: bms_cascade <group> [building]"))?;
    let building = args.next();

    let config = resolve_config()?;
    let mut snapshot = match &config.page_path {
        Some(path) => load_snapshot(path).await,
        None => PageSnapshot::default(),
    };
    if snapshot.base_url.is_empty() {
        snapshot.base_url = config.base_url.clone();
    }
    if snapshot.groups.is_empty() {
        snapshot.groups.push(SelectOption::new(group.clone(), group.clone()));
    }

    let handles = PageHandles::default();
    let state = PageState::new(Page::from_snapshot(&handles, &snapshot));
    let source = HttpFragmentSource::new(config.origin.clone(), config.fetch_timeout)?;
    let cascade = Cascade::ready(state, handles.clone(), Arc::new(source));

    info!(base_url = %snapshot.base_url, group = %group, "selecting group");
    cascade
        .select(&handles.group, &group)
        .await
        .ok_or_else(|| ConfigError::new(format!("unknown group {group:?}")))?
        .await?;

    if let Some(building) = building {
        info!(building = %building, "selecting building");
        cascade
            .select(&handles.building, &building)
            .await
            .ok_or_else(|| ConfigError::new(format!("unknown building {building:?}")))?
            .await?;
    }

    let snapshot = cascade.state().snapshot(&handles).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
