
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use fixture::{collect_walk, segment_uris};
use segue_hls::{
    HlsWalker, LoadOptions, Loaded, Loader, NetError, NetResult, WalkEvent, WalkOptions,
};
use url::Url;

/// In-memory loader: URL -> payload, with a log of every request made.
struct MapLoader {
    entries: HashMap<String, Bytes>,
    requests: Mutex<Vec<(String, LoadOptions)>>,
}

impl MapLoader {
    fn new(entries: &[(&str, &[u8])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(url, body)| (url.to_string(), Bytes::copy_from_slice(body)))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests_for(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }
}

#[async_trait]
impl Loader for MapLoader {
    async fn load(&self, url: &Url, opts: LoadOptions) -> NetResult<Loaded> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), opts));
        match self.entries.get(url.as_str()) {
            Some(data) => Ok(Loaded {
                data: data.clone(),
                mime_type: segue_net::mime_type_for_path(url.path()).map(str::to_string),
            }),
            None => Err(NetError::HttpStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn walks_through_an_injected_loader() {
    let loader = Arc::new(MapLoader::new(&[
        (
            "http://mem.test/master.m3u8",
            b"#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-STREAM-INF:BANDWIDTH=1280000\nv.m3u8\n",
        ),
        (
            "http://mem.test/v.m3u8",
            b"#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-TARGETDURATION:4\n#EXT-X-PLAYLIST-TYPE:VOD\n\
              #EXTINF:4.0,\ns0.ts\n#EXTINF:4.0,\ns1.ts\n#EXT-X-ENDLIST\n",
        ),
        ("http://mem.test/s0.ts", b"mem-0"),
        ("http://mem.test/s1.ts", b"mem-1"),
    ]));

    let walker = HlsWalker::with_loader(
        "http://mem.test/master.m3u8",
        WalkOptions::default(),
        loader.clone(),
    )
    .unwrap();
    let (events, errors) = collect_walk(walker.into_stream(), Duration::from_secs(10)).await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(matches!(events[0], WalkEvent::MasterPlaylist(_)));
    assert_eq!(segment_uris(&events).len(), 2);

    // Every resource exactly once.
    for url in [
        "http://mem.test/master.m3u8",
        "http://mem.test/v.m3u8",
        "http://mem.test/s0.ts",
        "http://mem.test/s1.ts",
    ] {
        assert_eq!(loader.requests_for(url), 1, "unexpected refetch of {url}");
    }

    // Playlists are fetched cache-bypassing and textual; segments as opaque
    // buffers.
    let requests = loader.requests.lock().unwrap();
    let opts_for = |url: &str| {
        requests
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, opts)| *opts)
            .unwrap()
    };
    assert!(opts_for("http://mem.test/master.m3u8").no_cache);
    assert!(!opts_for("http://mem.test/master.m3u8").read_as_buffer);
    assert!(opts_for("http://mem.test/s0.ts").read_as_buffer);
}
