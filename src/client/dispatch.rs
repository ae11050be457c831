//! Channel dispatch: logical operation name in, gateway call out.

use crate::channel;
use crate::types::request::RequestDescriptor;
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

use super::core::ApiClient;

impl ApiClient {
    /// Dispatch a logical channel with an optional JSON-object payload.
    ///
    /// Unknown channels and unresolved path placeholders fail before any
    /// network call. Keys consumed by the path template are stripped from
    /// the outgoing body; GET and DELETE routes send no body at all.
    pub async fn dispatch(&self, channel: &str, payload: Option<Value>) -> Result<Value> {
        let route = channel::lookup(channel).ok_or_else(|| Error::UnknownChannel {
            channel: channel.to_string(),
        })?;

        let mut body = match payload {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(Error::configuration(format!(
                    "payload for channel `{channel}` must be a JSON object, got {other}"
                )))
            }
        };

        let path = channel::resolve_path(channel, route.path_template, &mut body)?;
        let descriptor =
            RequestDescriptor::new(route.method, path).with_body(Value::Object(body));

        debug!(channel, method = %route.method, path = %descriptor.path, "dispatching channel");
        self.call(&descriptor).await
    }
}
