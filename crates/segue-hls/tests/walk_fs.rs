
use std::time::Duration;

use fixture::{collect_walk, segment_uris};
use segue_hls::{HlsWalker, WalkEvent, WalkOptions};

#[tokio::test]
async fn walks_a_playlist_tree_from_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    tokio::fs::write(
        root.join("master.m3u8"),
        "#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-STREAM-INF:BANDWIDTH=1280000\nv.m3u8\n",
    )
    .await
    .unwrap();
    tokio::fs::write(
        root.join("v.m3u8"),
        "#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-TARGETDURATION:4\n\
         #EXT-X-PLAYLIST-TYPE:VOD\n#EXTINF:4.0,\nseg0.ts\n#EXT-X-ENDLIST\n",
    )
    .await
    .unwrap();
    tokio::fs::write(root.join("seg0.ts"), b"file-payload").await.unwrap();

    // Relative location resolved against root_path; the file loader is
    // picked by scheme.
    let options = WalkOptions::default().with_root_path(root);
    let walker = HlsWalker::new("master.m3u8", options).unwrap();
    assert_eq!(walker.root().scheme(), "file");

    let (events, errors) = collect_walk(walker.into_stream(), Duration::from_secs(10)).await;
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    assert!(matches!(events[0], WalkEvent::MasterPlaylist(_)));
    assert!(events
        .iter()
        .any(|e| matches!(e, WalkEvent::MediaPlaylist(_))));

    let uris = segment_uris(&events);
    assert_eq!(uris.len(), 1);

    let seg = events
        .iter()
        .find_map(|e| match e {
            WalkEvent::Segment(seg) => Some(seg),
            _ => None,
        })
        .unwrap();
    assert_eq!(seg.data.as_deref(), Some(&b"file-payload"[..]));
    assert_eq!(seg.mime_type.as_deref(), Some("video/mp2t"));
}
