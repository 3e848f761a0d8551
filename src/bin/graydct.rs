//! graydct CLI - block-DCT grayscale image compression utility.
//!
//! Reads an 8-bit grayscale BMP, compresses it by truncating DCT
//! coefficients per block, and writes the reconstructed image next to
//! the original under a configurable output directory.

use clap::{Parser, Subcommand};
use graydct_rs::{bmp, compress, CompressionParameters};
use std::fs;
use std::path::{Path, PathBuf};

/// Block-DCT grayscale image compression
#[derive(Parser)]
#[command(name = "graydct")]
#[command(version)]
#[command(about = "Lossy grayscale BMP compression with block-based 2D DCT coding", long_about = None)]
#[command(after_help = "EXAMPLES:
    graydct compress -i photo.bmp -b 8 -d 10
    graydct compress -i photo.bmp --output-dir results
    graydct info -i photo.bmp

The frequency threshold d keeps coefficient (k, l) only when k + l < d,
so valid values range from 0 (drop everything, including the DC term)
to 2 * block_size - 2 (drop only the highest-frequency corner).")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a grayscale BMP image
    ///
    /// Tiles the image into block_size x block_size blocks (remainder
    /// rows and columns are dropped), cuts high-frequency DCT
    /// coefficients at the threshold and writes the reconstruction as
    /// compressed_<name>.bmp into the output directory.
    #[command(visible_alias = "c")]
    Compress {
        /// Input 8-bit grayscale BMP file
        #[arg(short, long, help = "Path to the input image file")]
        input: PathBuf,

        /// Side length of the square DCT blocks
        #[arg(short, long, default_value = "8")]
        block_size: usize,

        /// Frequency threshold d (0..=2*block_size-2)
        #[arg(short = 'd', long, default_value = "10")]
        threshold: i32,

        /// Directory for the compressed output image
        #[arg(short, long, default_value = "output_images")]
        output_dir: PathBuf,
    },

    /// Print the dimensions of a grayscale BMP image
    #[command(visible_alias = "i")]
    Info {
        /// Input BMP file
        #[arg(short, long, help = "Path to the input image file")]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            block_size,
            threshold,
            output_dir,
        } => compress_image(&input, block_size, threshold, &output_dir),
        Commands::Info { input } => print_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn compress_image(
    input: &Path,
    block_size: usize,
    threshold: i32,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let image = bmp::decode(&data)?;

    let parameters = CompressionParameters {
        block_size,
        frequency_threshold: threshold,
    };
    let output = compress(&image, &parameters)?;

    fs::create_dir_all(output_dir)?;
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let output_path = output_dir.join(format!("compressed_{}.bmp", stem));
    fs::write(&output_path, bmp::encode(&output)?)?;

    println!(
        "✓ Compressed {}x{} image to {}x{} (block size {}, threshold {}) -> {:?}",
        image.rows(),
        image.cols(),
        output.rows(),
        output.cols(),
        block_size,
        threshold,
        output_path
    );
    Ok(())
}

fn print_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let image = bmp::decode(&data)?;

    println!("File: {:?}", input);
    println!("Size: {} bytes", data.len());
    println!("Dimensions: {} rows x {} columns, 8-bit grayscale", image.rows(), image.cols());
    Ok(())
}
