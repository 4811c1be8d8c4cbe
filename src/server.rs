//! D-Bus binding of the provider to `org.gnome.Shell.SearchProvider2`.

use crate::provider::SearchProvider;
use crate::types::ResultMeta;
use std::collections::HashMap;
use std::sync::Arc;
use zbus::zvariant::Value;
use zbus::{Connection, connection, interface};

/// Well-known bus name claimed on the session bus.
pub const BUS_NAME: &str = "net.launchpad.zim.plugins.gnomeshellsearch.provider";

/// Object path the provider is served at.
pub const OBJECT_PATH: &str = "/net/launchpad/zim/plugins/gnomeshellsearch/provider";

/// D-Bus object exposing a [`SearchProvider`].
#[derive(Debug, Clone)]
pub struct ProviderServer {
    provider: Arc<SearchProvider>,
}

impl ProviderServer {
    pub fn new(provider: Arc<SearchProvider>) -> Self {
        Self { provider }
    }

    /// Claim [`BUS_NAME`] on the session bus and serve at [`OBJECT_PATH`].
    pub async fn serve(self) -> zbus::Result<Connection> {
        let connection = connection::Builder::session()?
            .name(BUS_NAME)?
            .serve_at(OBJECT_PATH, self)?
            .build()
            .await?;

        tracing::info!(bus_name = BUS_NAME, path = OBJECT_PATH, "Serving search provider");
        Ok(connection)
    }
}

#[interface(name = "org.gnome.Shell.SearchProvider2")]
impl ProviderServer {
    async fn get_initial_result_set(&self, terms: Vec<String>) -> Vec<String> {
        self.provider.get_initial_result_set(&terms).await
    }

    async fn get_subsearch_result_set(
        &self,
        previous_results: Vec<String>,
        terms: Vec<String>,
    ) -> Vec<String> {
        self.provider
            .get_subsearch_result_set(&previous_results, &terms)
            .await
    }

    async fn get_result_metas(
        &self,
        identifiers: Vec<String>,
    ) -> Vec<HashMap<String, Value<'static>>> {
        self.provider
            .get_result_metas(&identifiers)
            .into_iter()
            .map(meta_to_dict)
            .collect()
    }

    async fn activate_result(&self, identifier: String, terms: Vec<String>, timestamp: u32) {
        self.provider
            .activate_result(&identifier, &terms, timestamp)
            .await;
    }

    async fn launch_search(&self, terms: Vec<String>, timestamp: u32) {
        self.provider.launch_search(&terms, timestamp).await;
    }
}

/// Convert a meta into the `a{sv}` dictionary the shell expects.
fn meta_to_dict(meta: ResultMeta) -> HashMap<String, Value<'static>> {
    HashMap::from([
        ("id".to_string(), Value::from(meta.id)),
        ("name".to_string(), Value::from(meta.name)),
        ("gicon".to_string(), Value::from(meta.gicon)),
        ("description".to_string(), Value::from(meta.description)),
    ])
}
