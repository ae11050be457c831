//! Static channel table and path-template resolution.
//!
//! A channel is a logical operation name (`"booking:update"`) decoupled from
//! the HTTP verb and route that implement it. The table is a one-line-per-
//! channel data change: screens never learn REST paths, and route moves on
//! the backend touch exactly one entry here.

use crate::types::request::Method;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One entry in the channel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRoute {
    pub method: Method,
    pub path_template: &'static str,
}

const fn route(method: Method, path_template: &'static str) -> ChannelRoute {
    ChannelRoute {
        method,
        path_template,
    }
}

static CHANNELS: Lazy<HashMap<&'static str, ChannelRoute>> = Lazy::new(|| {
    use Method::*;
    HashMap::from([
        ("booking:search", route(Post, "/bookings/date-range")),
        ("booking:check-in", route(Post, "/checkinout/check-in")),
        ("booking:check-out", route(Post, "/checkinout/check-out")),
        ("booking:create", route(Post, "/bookings")),
        ("booking:update", route(Put, "/bookings/{bookingId}")),
        ("booking:cancel", route(Post, "/bookings/{bookingId}/cancel")),
        ("room:list", route(Get, "/rooms")),
        ("room:available", route(Post, "/rooms/available")),
        ("room:update-status", route(Put, "/rooms/{roomId}/status")),
        ("guest:list", route(Get, "/guests/search/")),
        ("guest:create", route(Post, "/guests")),
        ("guest:update", route(Put, "/guests/{guestId}")),
        ("guest:delete", route(Delete, "/guests/{guestId}")),
        ("report:revenue", route(Post, "/dashboard/revenue-report")),
        ("report:occupancy", route(Post, "/dashboard/occupancy-stats")),
        ("report:bookings", route(Post, "/bookings/date-range")),
    ])
});

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9_]*)\}").expect("placeholder regex"));

/// Look up a channel. `None` means the caller asked for an operation the
/// backend surface does not have; no network is attempted.
pub fn lookup(channel: &str) -> Option<ChannelRoute> {
    CHANNELS.get(channel).copied()
}

/// All known channel names, for diagnostics.
pub fn channel_names() -> Vec<&'static str> {
    let mut names: Vec<_> = CHANNELS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Substitute every `{placeholder}` in the template from `payload`, removing
/// consumed keys so path parameters are never duplicated in the body.
///
/// Fails with [`Error::MissingPathParameter`] when the payload does not
/// supply a placeholder: an unresolved placeholder sent to the backend is a
/// caller defect, not a valid request.
pub fn resolve_path(
    channel: &str,
    template: &str,
    payload: &mut Map<String, Value>,
) -> Result<String> {
    let mut path = template.to_string();
    for capture in PLACEHOLDER.captures_iter(template) {
        let key = &capture[1];
        let value = payload
            .remove(key)
            .ok_or_else(|| Error::MissingPathParameter {
                placeholder: key.to_string(),
                channel: channel.to_string(),
            })?;
        let segment = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(Error::configuration(format!(
                    "path parameter `{key}` for channel `{channel}` must be a string or number, got {other}"
                )))
            }
        };
        path = path.replace(&capture[0], &segment);
    }
    Ok(path)
}
