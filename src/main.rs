use std::path::PathBuf;
use std::process;

use clap::{ ArgAction, Parser };
use colored::*;
use simplelog::{ Config, LevelFilter, TermLogger, TerminalMode };

use tdis::*;
use tdis::arch::toy::ToyIsa;

#[derive(Parser, Debug)]
#[command(name = "tdis", about = "Disassembles a raw memory image of the toy instruction set.")]
struct Args {
	/// Raw image to load.
	#[arg(value_name = "IMAGE")]
	image: PathBuf,

	/// Address to load the image at (decimal, or hex with 0x or $).
	#[arg(long, value_name = "ADDR", value_parser = parse_va, default_value = "0")]
	load: VA,

	/// Address to start disassembling at. Defaults to the load address.
	#[arg(long, value_name = "ADDR", value_parser = parse_va)]
	start: Option<VA>,

	/// How many instructions to decode.
	#[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_COUNT)]
	count: usize,

	/// Compact display: relative branches show only their targets.
	#[arg(long, default_value_t = false)]
	compact: bool,

	/// Listing style: text, addr, or bytes.
	#[arg(long, value_name = "STYLE", value_parser = parse_style, default_value = "bytes")]
	style: StyleName,

	/// More logging (repeatable).
	#[arg(short, action = ArgAction::Count)]
	verbose: u8,
}

impl Args {
	fn config(&self) -> DisasConfig {
		DisasConfig::new()
			.max_count(self.count)
			.compact(self.compact)
			.style(self.style)
	}

	fn level(&self) -> LevelFilter {
		match self.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	}
}

fn main() {
	better_panic::install();

	let args = Args::parse();

	if let Err(e) = TermLogger::init(args.level(), Config::default(), TerminalMode::Stderr) {
		eprintln!("couldn't set up logging: {}", e);
	}

	if let Err(e) = disassemble(&args) {
		eprintln!("{}", e.to_string().red());
		process::exit(1);
	}
}

fn disassemble(args: &Args) -> std::io::Result<()> {
	let data = std::fs::read(&args.image)?;
	let img  = Image::new(&args.image.to_string_lossy(), args.load, data);
	log::info!("loaded {}", img);

	let config  = args.config();
	let mut dis = Disassembler::new(ToyIsa, ToyIsa);
	let start   = args.start.unwrap_or(args.load);
	let insts   = dis.run_with(&img, start, &config);
	let style   = config.listing_style();

	for inst in &insts {
		let line = style.fmt_line(inst);

		if inst.is_illegal() {
			println!("{}", line.red());
		} else {
			println!("{}", line);
		}
	}

	if let Some(e) = dis.last_error() {
		eprintln!("{}", format!("stopped: {}", e).yellow());
	}

	Ok(())
}

/// Decimal, or hex with a `0x` or `$` prefix.
fn parse_va(s: &str) -> Result<VA, String> {
	let res = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix('$')) {
		u32::from_str_radix(hex, 16)
	} else {
		s.parse()
	};

	res.map(VA::new).map_err(|_| format!("bad address '{}'", s))
}

fn parse_style(s: &str) -> Result<StyleName, String> {
	s.parse().map_err(|_| format!("unknown style '{}' (expected text, addr, or bytes)", s))
}
