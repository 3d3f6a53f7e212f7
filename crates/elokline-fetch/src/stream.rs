//! Lazy game record stream.

use elokline_types::RawGame;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};

use crate::{FetchError, GamesClient, GamesQuery, ndjson_stream};

/// Creates a lazy stream of the games matching `query`.
///
/// Nothing is sent until the stream is first polled. Records are yielded in
/// the order the server delivers them, each one as soon as its line has
/// arrived, and the stream ends when the server closes the body or after
/// `query.max` records. A decode error ends the stream after being yielded.
///
/// The stream is single-pass. Dropping it closes the underlying connection.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `query` - Player, speed category, limit and optional resume point
pub fn game_stream(
    client: &GamesClient,
    query: &GamesQuery,
) -> impl Stream<Item = Result<RawGame, FetchError>> + Send + 'static {
    let client = client.clone();
    let max = query.max;
    let query = query.clone();

    stream::once(async move { client.open(&query).await })
        .map(|opened| match opened {
            Ok(response) => ndjson_stream(response.bytes_stream()).left_stream(),
            Err(e) => stream::once(async move { Err::<RawGame, _>(e) }).right_stream(),
        })
        .flatten()
        .take(max)
}

/// Drains a game stream into a list, failing on the first error.
///
/// # Errors
///
/// Returns the first transport or decode error of the stream.
pub async fn collect_games(
    games: impl Stream<Item = Result<RawGame, FetchError>>,
) -> Result<Vec<RawGame>, FetchError> {
    games.try_collect().await
}
