// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! List and watch access to the cluster, by target kind.

use crate::error::{Result, WaitError};
use crate::types::{ChangeEvent, ObservedObject, ResourceVersion, Snapshot, TargetKind};
use futures::stream::{self, BoxStream};
use futures::{future, Stream, StreamExt, TryStreamExt};
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{ListParams, ObjectList, WatchEvent, WatchParams};
use kube::core::{NamespaceResourceScope, PartialObjectMeta};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, instrument};

/// Ordered change events of one kind in one namespace
pub type EventStream = BoxStream<'static, Result<ChangeEvent>>;

/// The cluster capabilities a watch session needs.
pub trait ResourceClient: Send + Sync + 'static {
    /// Consistent snapshot of all objects of `kind` in `namespace`
    fn list(
        &self,
        kind: TargetKind,
        namespace: &str,
    ) -> impl Future<Output = Result<Snapshot>> + Send;

    /// Changes after `from`. The stream is lazy: nothing is requested from the
    /// cluster until it is first polled.
    fn watch(&self, kind: TargetKind, namespace: &str, from: &ResourceVersion) -> EventStream;
}

/// Conversion from fetched API objects into observed snapshots
trait Observe: Clone + DeserializeOwned + Send + 'static {
    fn observe(&self) -> ObservedObject;
}

impl Observe for Job {
    fn observe(&self) -> ObservedObject {
        ObservedObject::from_job(self)
    }
}

impl Observe for PartialObjectMeta<Secret> {
    fn observe(&self) -> ObservedObject {
        ObservedObject::from_secret(self)
    }
}

/// `ResourceClient` backed by the Kubernetes API.
///
/// Jobs are fetched whole for their status. Secrets only need to exist, so
/// they are listed and watched as metadata and their data never leaves the
/// API server.
#[derive(Clone)]
pub struct KubeResourceClient {
    client: Client,
}

impl KubeResourceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl ResourceClient for KubeResourceClient {
    #[instrument(skip(self))]
    async fn list(&self, kind: TargetKind, namespace: &str) -> Result<Snapshot> {
        let params = ListParams::default();
        match kind {
            TargetKind::Job => {
                let listed = self.api::<Job>(namespace).list(&params).await;
                snapshot(kind, namespace, listed)
            }
            TargetKind::Secret => {
                let listed = self.api::<Secret>(namespace).list_metadata(&params).await;
                snapshot(kind, namespace, listed)
            }
        }
    }

    fn watch(&self, kind: TargetKind, namespace: &str, from: &ResourceVersion) -> EventStream {
        let version = from.to_string();
        match kind {
            TargetKind::Job => {
                let api = self.api::<Job>(namespace);
                change_events(kind, namespace, from, async move {
                    api.watch(&WatchParams::default(), &version).await
                })
            }
            TargetKind::Secret => {
                let api = self.api::<Secret>(namespace);
                change_events(kind, namespace, from, async move {
                    api.watch_metadata(&WatchParams::default(), &version).await
                })
            }
        }
    }
}

fn snapshot<K: Observe>(
    kind: TargetKind,
    namespace: &str,
    listed: kube::Result<ObjectList<K>>,
) -> Result<Snapshot> {
    let list = listed.map_err(|source| WaitError::ListFailed {
        kind,
        namespace: namespace.to_string(),
        source,
    })?;

    let Some(resource_version) = list.metadata.resource_version else {
        return Err(WaitError::MissingResourceVersion {
            kind,
            namespace: namespace.to_string(),
        });
    };

    debug!(
        "Listed {} {}s in namespace {} at version {}",
        list.items.len(),
        kind,
        namespace,
        resource_version
    );

    Ok(Snapshot {
        resource_version: ResourceVersion::new(resource_version),
        objects: list.items.iter().map(Observe::observe).collect(),
    })
}

/// Turn a pending watch request into a lazy stream of change events
fn change_events<K, F, S>(
    kind: TargetKind,
    namespace: &str,
    from: &ResourceVersion,
    open: F,
) -> EventStream
where
    K: Observe,
    F: Future<Output = kube::Result<S>> + Send + 'static,
    S: Stream<Item = kube::Result<WatchEvent<K>>> + Send + 'static,
{
    let version = from.to_string();
    let namespace = namespace.to_string();
    let watch_failed = move |message: String| WaitError::WatchFailed {
        kind,
        namespace: namespace.clone(),
        message,
    };
    let stream_failed = watch_failed.clone();
    let event_failed = watch_failed.clone();

    stream::once(async move {
        debug!("Opening {} watch from version {}", kind, version);
        open.await.map_err(|e| watch_failed(e.to_string()))
    })
    .map_ok(move |events| {
        let stream_failed = stream_failed.clone();
        events.map_err(move |e| stream_failed(e.to_string()))
    })
    .try_flatten()
    .try_filter_map(move |event| future::ready(change_event(event).map_err(&event_failed)))
    .boxed()
}

/// Bookmarks carry no object change and are skipped
fn change_event<K: Observe>(event: WatchEvent<K>) -> std::result::Result<Option<ChangeEvent>, String> {
    match event {
        WatchEvent::Added(object) => Ok(Some(ChangeEvent::Added(object.observe()))),
        WatchEvent::Modified(object) => Ok(Some(ChangeEvent::Updated(object.observe()))),
        WatchEvent::Deleted(object) => Ok(Some(ChangeEvent::Deleted(object.observe()))),
        WatchEvent::Bookmark(_) => Ok(None),
        WatchEvent::Error(response) => Err(response.to_string()),
    }
}
