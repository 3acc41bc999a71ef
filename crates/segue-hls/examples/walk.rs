//! Walk an HLS playlist and print one line per emitted item.
//!
//! ```sh
//! cargo run --example walk -- https://example.com/master.m3u8
//! RUST_LOG=segue_hls=debug cargo run --example walk -- ./fixtures/master.m3u8
//! ```

use futures::StreamExt;
use segue_hls::{HlsWalker, WalkEvent, WalkOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let location = std::env::args()
        .nth(1)
        .ok_or("usage: walk <url-or-path>")?;

    let walker = HlsWalker::new(&location, WalkOptions::default())?;
    let mut stream = walker.into_stream();

    while let Some(item) = stream.next().await {
        match item {
            Ok(WalkEvent::MasterPlaylist(master)) => {
                println!(
                    "master   {} ({} variants, {} renditions, {} session entries)",
                    master.uri,
                    master.variants.len(),
                    master.renditions.len(),
                    master.session_data.len() + master.session_keys.len(),
                );
            }
            Ok(WalkEvent::MediaPlaylist(media)) => {
                println!(
                    "media    {} ({:?}, {} segments{})",
                    media.uri,
                    media.playlist_type,
                    media.segments.len(),
                    if media.end_list { ", endlist" } else { "" },
                );
            }
            Ok(WalkEvent::Segment(seg)) => {
                println!(
                    "segment  {} ({} bytes{})",
                    seg.uri,
                    seg.data.as_ref().map_or(0, |d| d.len()),
                    seg.key.as_ref().map_or("", |_| ", encrypted"),
                );
            }
            Err(e) => eprintln!("error    {e}"),
        }
    }

    println!("walk complete");
    Ok(())
}
