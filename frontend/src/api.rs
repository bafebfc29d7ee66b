use gloo_net::http::{Request, Response};
use serde_json::Value;
use shared::{error::ErrorResponse, models::*};
use crate::config::CONFIG;

fn votes_url() -> String {
    format!("{}/votes", CONFIG.api_base_url)
}

fn vote_url(id: &str) -> String {
    format!("{}/votes/{}", CONFIG.api_base_url, id)
}

async fn error_message(response: Response, fallback: &str) -> String {
    response.json::<ErrorResponse>().await
        .map(|err| err.error)
        .unwrap_or_else(|_| fallback.into())
}

pub async fn fetch_votes() -> Result<Vec<VoteRecord>, String> {
    let response = Request::get(&votes_url())
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err("Failed to load votes. Please try again.".into());
    }
    response.json::<Vec<VoteRecord>>().await.map_err(|e| e.to_string())
}

/// `Ok(None)` when the server has no vote with this id, whether it says so
/// with a 404 or with an empty object.
pub async fn fetch_vote(id: &str) -> Result<Option<VoteRecord>, String> {
    let response = Request::get(&vote_url(id))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => {
            let value = response.json::<Value>().await.map_err(|e| e.to_string())?;
            if value.as_object().map_or(true, |fields| fields.is_empty()) {
                return Ok(None);
            }
            serde_json::from_value(value).map(Some).map_err(|e| e.to_string())
        }
        404 => Ok(None),
        _ => Err(error_message(response, "Failed to load vote").await),
    }
}

pub async fn create_vote(request: &CreateVoteRequest) -> Result<VoteRecord, String> {
    let response = Request::post(&votes_url())
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        201 => response.json::<VoteRecord>().await.map_err(|e| e.to_string()),
        400 => Err(error_message(response, "Invalid request").await),
        _ => Err("Failed to create vote. Please try again.".into()),
    }
}

pub async fn update_vote(id: VoteId, request: &UpdateVoteRequest) -> Result<(), String> {
    let response = Request::put(&vote_url(&id.to_string()))
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => Ok(()),
        404 => Err("This vote no longer exists.".into()),
        _ => Err(error_message(response, "Failed to update vote. Please try again.").await),
    }
}

pub async fn delete_vote(id: VoteId) -> Result<(), String> {
    let response = Request::delete(&vote_url(&id.to_string()))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    match response.status() {
        200 => Ok(()),
        404 => Err("This vote was already deleted.".into()),
        _ => Err("Failed to delete vote. Please try again.".into()),
    }
}
