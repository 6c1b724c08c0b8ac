use pco_image_rs::logger;
use pco_image_rs::pco_image::{HeaderSizeResolver, ImageSource, ImageStamp, PcoImage};

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: pco_image_rs <image.b16|image.tiff> [more images...]");
        std::process::exit(2);
    }

    // One resolver for the whole run, so the header size learned from the
    // first b16 file speeds up every following one.
    let mut resolver = HeaderSizeResolver::default();

    for path in &paths {
        let mut image = match PcoImage::open(path) {
            Ok(image) => image,
            Err(e) => {
                error!("{path}: {e}");
                continue;
            }
        };

        if let ImageSource::B16 { .. } = image.source() {
            match image.header_info() {
                Ok(header) => info!(
                    "{path}: {}x{} pixels, {} byte header",
                    header.width, header.height, header.header_size
                ),
                Err(e) => error!("{path}: {e}"),
            }
        }

        match image.stamp(&mut resolver) {
            Ok(ImageStamp::Parsed { index, timestamp }) => {
                info!("{path}: frame {index} taken {timestamp}")
            }
            Ok(ImageStamp::Raw { index, timestamp }) => {
                info!("{path}: frame '{index}' taken '{timestamp}'")
            }
            Err(e) => error!("{path}: {e}"),
        }
    }

    Ok(())
}
