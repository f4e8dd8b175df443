//! Searches for images and downloads the ones above a minimum resolution

use std::path::Path;

use ddg_images_core::{DdgImageScraper, SafeSearch};

const QUERY: &str = "Red Panda";
const MAX_DOWNLOADS: usize = 10;
const OUTPUT_DIR: &str = "image_downloads";
const MIN_PIXELS: u64 = 1_000_000; // 1 megapixel

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Searching for '{}', saving to '{}'...\n", QUERY, OUTPUT_DIR);

    let scraper = DdgImageScraper::new()?;
    let mut search = scraper.search(QUERY)?.safe_search(SafeSearch::Moderate);
    let mut downloaded = 0usize;

    while let Some(image) = search.next().await {
        if downloaded >= MAX_DOWNLOADS {
            println!("\nReached {} downloads, stopping.", MAX_DOWNLOADS);
            break;
        }

        let image = image?;
        println!("{} ({}x{})", image.title, image.width, image.height);

        if image.pixel_count() < MIN_PIXELS {
            println!("  -> skipping, below {} pixels", MIN_PIXELS);
            continue;
        }

        match scraper
            .download(&image.image_url, Path::new(OUTPUT_DIR), None)
            .await
        {
            Ok(path) => {
                downloaded += 1;
                println!("  -> saved to {} ({}/{})", path.display(), downloaded, MAX_DOWNLOADS);
            }
            Err(e) => println!("  -> download failed: {}", e),
        }
    }

    println!("\nDone. {} images downloaded.", downloaded);
    Ok(())
}
