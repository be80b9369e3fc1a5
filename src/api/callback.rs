use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::{types::CallbackOutcome, warning};

/// Slot holding the sender half of the single-result channel.
///
/// The first request that carries a code or an error takes the sender, every
/// later request finds the slot empty.
pub type CallbackSender = Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>;

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(sender): Extension<CallbackSender>,
) -> (StatusCode, Html<&'static str>) {
    let outcome = if let Some(code) = params.get("code").filter(|c| !c.is_empty()) {
        CallbackOutcome::Code(code.clone())
    } else if let Some(err) = params.get("error") {
        CallbackOutcome::Denied(err.clone())
    } else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>"),
        );
    };

    let Some(tx) = sender.lock().await.take() else {
        return (
            StatusCode::CONFLICT,
            Html("<h4>Authorization code already received.</h4>"),
        );
    };

    let denied = matches!(outcome, CallbackOutcome::Denied(_));
    if tx.send(outcome).is_err() {
        warning!("Received a callback but nobody is waiting for it anymore.");
    }

    if denied {
        (
            StatusCode::BAD_REQUEST,
            Html("<h4>Authorization was denied.</h4>"),
        )
    } else {
        (
            StatusCode::OK,
            Html("Received authorization code. You can close this window."),
        )
    }
}
