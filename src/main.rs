use anyhow::{Context, Result};
use bmpfx::{
    BmpInfo, BmpPermissiveness, EditRequest, Limits, Transform, TransformParams,
    Unstoppable,
};
use clap::Parser;
use console::style;
use std::time::Instant;

mod cli;

use cli::{Args, Command};

fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

fn print_catalog() {
    println!("{}", style("Transforms").bold().blue());
    for number in 1..=10u8 {
        if let Some(t) = Transform::from_menu(number, TransformParams::default()) {
            println!("  {:>2}) {}", style(number).cyan(), t.name());
        }
    }
    println!("Apply one with `bmpfx run <NUMBER> INPUT OUTPUT`.");
}

fn print_info(path: &std::path::Path) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let info =
        BmpInfo::from_bytes(&data).with_context(|| format!("parsing {}", path.display()))?;

    println!("{}", style(path.display()).bold());
    println!("  magic:             {}", String::from_utf8_lossy(&info.magic));
    println!("  dimensions:        {}x{}", info.width, info.height);
    println!("  bits per pixel:    {}", info.bits_per_pixel);
    println!("  compression:       {}", info.compression);
    println!("  pixel offset:      {}", info.data_offset);
    println!("  info header size:  {}", info.info_header_size);
    println!(
        "  file size:         {} declared, {} expected, {} on disk",
        info.file_size,
        info.expected_file_size(),
        data.len()
    );
    println!(
        "  resolution:        {}x{} px/m",
        info.x_pixels_per_meter, info.y_pixels_per_meter
    );
    if info.is_true_color() {
        println!("  {}", style("decodable as 24-bit true color").green());
    } else {
        println!("  {}", style("not a 24-bit true color image").red());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some((transform, files)) = args.command.edit() else {
        return match &args.command {
            Command::Info { file } => print_info(file),
            _ => {
                print_catalog();
                Ok(())
            }
        };
    };

    let permissiveness = if args.strict {
        BmpPermissiveness::Strict
    } else {
        BmpPermissiveness::Standard
    };
    let limits = Limits {
        max_pixels: args.max_pixels,
        ..Default::default()
    };

    verbose_println(
        args.verbose,
        &format!(
            "{} -> {} ({transform}, {permissiveness:?})",
            files.input.display(),
            files.output.display()
        ),
    );

    let start = Instant::now();
    let report = EditRequest::new(&files.input, &files.output, transform)
        .with_permissiveness(permissiveness)
        .run_with_limits(Some(&limits), Unstoppable)
        .with_context(|| {
            format!(
                "{} failed for {}",
                transform.name(),
                files.input.display()
            )
        })?;

    verbose_println(
        args.verbose,
        &format!(
            "{}x{} -> {}x{}, {} bytes in {:.1?}",
            report.input_width,
            report.input_height,
            report.output_width,
            report.output_height,
            report.bytes_written,
            start.elapsed()
        ),
    );
    println!(
        "{} {}",
        style("✓").green().bold(),
        style(files.output.display()).bold()
    );
    Ok(())
}
