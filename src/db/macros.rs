/// Read-through lookup against a cache exposing `get_cached(&key)` and an async
/// `store(key, &value)`.
///
/// On a hit the future is never polled. On a miss it is awaited, errors propagate
/// with `?`, and the value is stored before being returned.
///
/// ```rust,ignore
/// cached!(self, movie_id, provider.fetch_details(movie_id))
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_cached(&$key) {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.store($key, &value).await;
            Ok(value)
        }
    }};
}
