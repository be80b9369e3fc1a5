use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Res,
    config::Settings,
    types::{FollowedArtistsResponse, SavedTracksPage},
    utils,
};

const PAGE_LIMIT: u32 = 50;

/// A page of a cursor-paginated collection.
pub trait Page: DeserializeOwned {
    /// Splits the page into its items and the URL of the next page.
    fn into_parts(self) -> (Vec<Value>, Option<String>);
}

impl Page for SavedTracksPage {
    fn into_parts(self) -> (Vec<Value>, Option<String>) {
        (self.items, self.next)
    }
}

impl Page for FollowedArtistsResponse {
    fn into_parts(self) -> (Vec<Value>, Option<String>) {
        (self.artists.items, self.artists.next)
    }
}

/// Follows the `next` cursor starting at `url` and collects every item.
///
/// Items keep the order the API returns them in. The loop stops when the
/// cursor is missing, `null` or empty. `on_page` is called after each page
/// with the number of items collected so far.
///
/// # Errors
///
/// Any network error, non-2xx status or undecodable page aborts the whole
/// fetch; nothing is retried.
pub async fn fetch_all<P, F>(
    client: &Client,
    token: &str,
    url: &str,
    mut on_page: F,
) -> Res<Vec<Value>>
where
    P: Page,
    F: FnMut(usize),
{
    let mut items = Vec::new();
    let mut next = Some(url.to_string());

    while let Some(url) = next.take() {
        let page = client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<P>()
            .await?;

        let (page_items, cursor) = page.into_parts();
        items.extend(page_items);
        on_page(items.len());

        next = cursor.filter(|c| !c.is_empty());
    }

    Ok(items)
}

/// Retrieves all tracks saved in the user's library.
pub async fn fetch_liked_tracks(
    client: &Client,
    settings: &Settings,
    token: &str,
) -> Res<Vec<Value>> {
    let url = format!(
        "{uri}/me/tracks?limit={limit}",
        uri = settings.api_base(),
        limit = PAGE_LIMIT
    );

    let pb = utils::spinner("Fetching liked tracks...");
    let res = fetch_all::<SavedTracksPage, _>(client, token, &url, |n| {
        pb.set_message(format!("Fetched {} tracks...", n))
    })
    .await;
    pb.finish_and_clear();
    res
}

/// Retrieves all artists the user follows.
pub async fn fetch_followed_artists(
    client: &Client,
    settings: &Settings,
    token: &str,
) -> Res<Vec<Value>> {
    let url = format!(
        "{uri}/me/following?type=artist&limit={limit}",
        uri = settings.api_base(),
        limit = PAGE_LIMIT
    );

    let pb = utils::spinner("Fetching followed artists...");
    let res = fetch_all::<FollowedArtistsResponse, _>(client, token, &url, |n| {
        pb.set_message(format!("Fetched {} artists...", n))
    })
    .await;
    pb.finish_and_clear();
    res
}
