use gtm_config::{LayeredStore, TagManagerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), gtm_config::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // GTM__STORES__DE__MFGOOGLETAGMANAGER__GENERAL__PUBLIC_ID=GTM-DE overrides per store
    let store = LayeredStore::builder()
        .with_file("demos/storefront.toml", true)
        .with_env("GTM", "__")
        .with_file("demos/storefront.local.toml", false)
        .build()?;

    let stores: Vec<String> = store.store_ids().map(String::from).collect();
    let config = TagManagerConfig::new(store);

    println!(
        "default store: enabled={} public_id={}",
        config.is_enabled(None),
        config.public_id(None)
    );

    for id in &stores {
        let scope = Some(id.as_str());
        println!(
            "{id}: enabled={} container={} analytics={} measurement_id={}",
            config.is_enabled(scope),
            config.container_id(scope),
            config.is_analytics_enabled(scope),
            config.measurement_id(scope),
        );
    }

    Ok(())
}
