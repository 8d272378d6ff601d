use median_rank::image::io::{
    load_grayscale_image, save_grayscale_f32, save_grayscale_u8, write_json_file,
};
use median_rank::{median_filter_into, MedianParams};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "median_demo".to_string());
    let config = parse_args(&program)?;

    let gray = load_grayscale_image(&config.input_path)?;
    let params = MedianParams {
        hy: config.radius_y,
        hx: config.radius_x,
        workers: config.workers,
        ..Default::default()
    };

    let report = if config.float_path {
        let img = gray.to_f32();
        let mut out = img.same_shape();
        let report = median_filter_into(&img.data, &mut out.data, img.h, img.w, &params);
        save_grayscale_f32(&out, &config.output_path)?;
        report
    } else {
        let mut out = gray.same_shape();
        let report = median_filter_into(&gray.data, &mut out.data, gray.h, gray.w, &params);
        save_grayscale_u8(&out, &config.output_path)?;
        report
    };

    println!(
        "{}x{} kernel {}x{} tiles={} latency_ms={:.3} -> {}",
        report.width,
        report.height,
        2 * report.hx + 1,
        2 * report.hy + 1,
        report.tile_count,
        report.latency_ms,
        config.output_path.display()
    );

    if let Some(path) = config.report_out {
        write_json_file(&path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

struct CliConfig {
    input_path: PathBuf,
    output_path: PathBuf,
    radius_x: usize,
    radius_y: usize,
    workers: Option<usize>,
    float_path: bool,
    report_out: Option<PathBuf>,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut radius_x: usize = 1;
    let mut radius_y: usize = 1;
    let mut workers: Option<usize> = None;
    let mut float_path = false;
    let mut report_out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--input expects a path\n{}", usage(program)))?;
                input_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--output expects a path\n{}", usage(program)))?;
                output_path = Some(PathBuf::from(value));
            }
            "--radius" => {
                let value = parse_usize(&mut args, "--radius", program)?;
                radius_x = value;
                radius_y = value;
            }
            "--radius-x" => {
                radius_x = parse_usize(&mut args, "--radius-x", program)?;
            }
            "--radius-y" => {
                radius_y = parse_usize(&mut args, "--radius-y", program)?;
            }
            "--workers" => {
                workers = Some(parse_usize(&mut args, "--workers", program)?);
            }
            "--float" => {
                float_path = true;
            }
            "--report" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--report expects a path\n{}", usage(program)))?;
                report_out = Some(PathBuf::from(value));
            }
            other => {
                return Err(format!("Unknown argument '{other}'\n{}", usage(program)));
            }
        }
    }

    Ok(CliConfig {
        input_path: input_path.ok_or_else(|| format!("--input is required\n{}", usage(program)))?,
        output_path: output_path
            .ok_or_else(|| format!("--output is required\n{}", usage(program)))?,
        radius_x,
        radius_y,
        workers,
        float_path,
        report_out,
    })
}

fn parse_usize(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
    program: &str,
) -> Result<usize, String> {
    let value = args
        .next()
        .ok_or_else(|| format!("{flag} expects a value\n{}", usage(program)))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value '{value}' for {flag}"))
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} --input <image> --output <image> [options]\n\
         \n\
         Options:\n\
         \x20 --radius <n>     kernel half-extent in both directions (default 1)\n\
         \x20 --radius-x <n>   kernel half-extent along x\n\
         \x20 --radius-y <n>   kernel half-extent along y\n\
         \x20 --workers <n>    worker threads (default: host concurrency)\n\
         \x20 --float          filter in normalized f32 space\n\
         \x20 --report <path>  write a JSON run summary\n\
         \x20 --help           show this message"
    )
}
