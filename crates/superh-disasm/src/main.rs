use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use superh_rs::disasm::fmt_decoded;
use superh_rs::{ArchConfig, Architecture, IsaVariant};

use superh_disasm::{
    analyze_entries, block_edges, build_blocks, functions, load_raw_bin, read_opcode, Block, EdgeOut,
    FunctionOut, Image,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "SuperH disassembler CLI", long_about=None)]
struct Cli {
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// ISA variant (overrides --config)
    #[arg(long, value_enum)]
    isa: Option<IsaVariant>,
    /// JSON ArchConfig file
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble a range [start, end) in bytes
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Analyze code graph from entry points
    Analyze {
        /// Entry addresses (hex or dec). Repeat flag to add multiple entries.
        #[arg(long = "entry", value_name = "ADDR", num_args = 1.., required = false)]
        entries: Vec<String>,
        /// Maximum instructions to decode before stopping
        #[arg(long, default_value_t = 100_000usize)]
        max_instr: usize,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Emit a linear disassembly listing of analyzed code (text format only)
        #[arg(long)]
        listing: bool,
        /// Show instruction bytes in listing
        #[arg(long)]
        show_bytes: bool,
        /// Import labels from JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        labels_in: Option<String>,
        /// Export labels to JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        labels_out: Option<String>,
        /// Write analysis output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Lift a range [start, end) to IL
    Lift {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Fuse delayed branches with their slot instruction
        #[arg(long)]
        fuse: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Clone, serde::Serialize)]
struct BlockOut { start: u32, end: u32, insns: Vec<String> }

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct LabelKV { addr: u32, name: String }

#[derive(Debug, Clone, serde::Serialize)]
struct ReportWithLabels {
    entries: Vec<u32>,
    blocks: Vec<BlockOut>,
    edges: Vec<EdgeOut>,
    functions: Vec<FunctionOut>,
    labels: Vec<LabelKV>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct LiftOut { addr: u32, lifted: Option<superh_rs::Lifted>, error: Option<String> }

fn load_config(path: Option<&str>, isa: Option<IsaVariant>) -> Result<ArchConfig> {
    let mut cfg = match path {
        Some(p) => {
            let txt = std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str(&txt).with_context(|| format!("parsing {p}"))?
        }
        None => ArchConfig::default(),
    };
    if let Some(v) = isa { cfg.variant = v; }
    Ok(cfg)
}

/// One listing line; undecodable words print as `.word`.
fn render_line(arch: &Architecture, img: &Image, pc: u32, show_bytes: bool) -> Option<String> {
    let bytes = read_opcode(img, pc)?;
    let mut s = format!("{pc:#010x}: ");
    if show_bytes { let _ = write!(s, "{:02x} {:02x}   ", bytes[0], bytes[1]); }
    match arch.decode(bytes) {
        Ok(d) => s.push_str(&fmt_decoded(&d, pc)),
        Err(_) => { let _ = write!(s, ".word {:#06x}", u16::from_be_bytes(bytes)); }
    }
    Some(s)
}

fn emit(out: Option<String>, text: &str) -> Result<()> {
    if let Some(path) = out { std::fs::write(path, text)?; } else { print!("{}", text); }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let img = load_raw_bin(Path::new(&cli.input), cli.base, cli.skip, cli.len)?;
    let arch = Architecture::new(load_config(cli.config.as_deref(), cli.isa)?);

    match cli.cmd {
        Command::Sections => {
            println!("{:<10} {:<12} {:<12} {:<6} {:<6}", "name", "start", "end", "perms", "kind");
            for s in &img.segments {
                let start = s.base;
                let end = s.base.wrapping_add(s.bytes.len() as u32);
                println!("{:<10} {start:#010x}   {end:#010x}   {:<6} {:<6}", s.name, s.perms, s.kind);
            }
        }
        Command::Range { start, end, show_bytes, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut buf = String::new();
            let mut pc = start;
            while pc < end {
                let Some(line) = render_line(&arch, &img, pc, show_bytes) else { let _ = writeln!(buf, "{pc:#010x}: <oob>"); break; };
                let _ = writeln!(buf, "{line}");
                pc = pc.wrapping_add(2);
            }
            emit(out, &buf)?;
        }
        Command::Analyze { entries, max_instr, format, listing, show_bytes, labels_in, labels_out, out } => {
            // default seed: start of first segment
            let mut seeds: Vec<u32> = if entries.is_empty() {
                img.segments.first().map(|s| s.base).into_iter().collect()
            } else {
                entries.iter().map(|e| parse_u32(e)).collect::<Result<_>>()?
            };
            seeds.sort_unstable();
            seeds.dedup();

            let analysis = analyze_entries(&arch, &img, &seeds, max_instr);
            let (blocks, addr_to_block) = build_blocks(&analysis, &seeds);
            let edges_out = block_edges(&analysis, &addr_to_block);
            let funcs = functions(&seeds, &edges_out);

            let mut labels: HashMap<u32, String> = HashMap::new();
            if let Some(path) = &labels_in {
                let txt = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
                let v: Vec<LabelKV> = serde_json::from_str(&txt).with_context(|| format!("parsing {path}"))?;
                for kv in v { labels.insert(kv.addr, kv.name); }
            }
            for &e in &seeds { labels.entry(e).or_insert_with(|| format!("sub_{e:08x}")); }
            for b in &blocks { labels.entry(b.start).or_insert_with(|| format!("loc_{:08x}", b.start)); }
            let mut lbl_vec: Vec<LabelKV> = labels.iter().map(|(k, v)| LabelKV { addr: *k, name: v.clone() }).collect();
            lbl_vec.sort_by_key(|kv| kv.addr);
            if let Some(path) = &labels_out {
                std::fs::write(path, serde_json::to_string_pretty(&lbl_vec)?)?;
            }

            match format {
                OutputFormat::Json => {
                    let report = ReportWithLabels {
                        entries: seeds.clone(),
                        blocks: enrich_blocks_with_mnemonics(&arch, &img, &blocks, show_bytes),
                        edges: edges_out,
                        functions: funcs,
                        labels: lbl_vec,
                    };
                    emit(out, &(serde_json::to_string_pretty(&report)? + "\n"))?;
                }
                OutputFormat::Text => {
                    let mut buf = String::new();
                    let _ = writeln!(buf, "Analysis summary:");
                    let _ = writeln!(buf, "  entries   : {:?}", seeds.iter().map(|a| format!("{a:#010x}")).collect::<Vec<_>>());
                    let _ = writeln!(buf, "  insts     : {}", analysis.visited.len());
                    let _ = writeln!(buf, "  blocks    : {}", blocks.len());
                    let _ = writeln!(buf, "  edges     : {}", edges_out.len());
                    let _ = writeln!(buf, "  functions : {}", funcs.len());
                    let _ = writeln!(buf, "Edges:");
                    for e in &edges_out {
                        let _ = writeln!(buf, "  {:#010x} -> {:#010x} ({})", e.from, e.to, e.kind);
                    }
                    if listing {
                        let _ = writeln!(buf, "\nListing (analyzed PCs):");
                        for &pc in &analysis.visited {
                            if let Some(lbl) = labels.get(&pc) { let _ = writeln!(buf, "{pc:#010x} <{lbl}>:"); }
                            if let Some(line) = render_line(&arch, &img, pc, show_bytes) {
                                let slot = if analysis.slots.contains(&pc) { "   ; delay slot" } else { "" };
                                let _ = writeln!(buf, "  {line}{slot}");
                            }
                        }
                    }
                    emit(out, &buf)?;
                }
            }
        }
        Command::Lift { start, end, fuse, format } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut rows = Vec::new();
            let mut pc = start;
            while pc < end {
                let Some(bytes) = read_opcode(&img, pc) else { break; };
                let next = read_opcode(&img, pc.wrapping_add(2)).filter(|_| pc.wrapping_add(2) < end);
                let res = match next {
                    Some(next) if fuse => arch.lift_with_slot(bytes, next, pc),
                    _ => arch.lift(bytes, pc),
                };
                match res {
                    Ok(lifted) => {
                        let len = lifted.length;
                        rows.push(LiftOut { addr: pc, lifted: Some(lifted), error: None });
                        pc = pc.wrapping_add(len);
                    }
                    Err(e) => {
                        rows.push(LiftOut { addr: pc, lifted: None, error: Some(e.to_string()) });
                        pc = pc.wrapping_add(2);
                    }
                }
            }
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Text => {
                    for row in &rows {
                        println!("{}", render_line(&arch, &img, row.addr, true).unwrap_or_default());
                        match (&row.lifted, &row.error) {
                            (Some(l), _) => for op in &l.ops { println!("    {op:?}"); },
                            (None, Some(e)) => println!("    ; {e}"),
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn enrich_blocks_with_mnemonics(arch: &Architecture, img: &Image, blocks: &[Block], show_bytes: bool) -> Vec<BlockOut> {
    blocks.iter().map(|b| {
        let mut insns = Vec::new();
        let mut pc = b.start;
        while pc < b.end {
            match render_line(arch, img, pc, show_bytes) {
                Some(line) => insns.push(line),
                None => break,
            }
            pc = pc.wrapping_add(2);
        }
        BlockOut { start: b.start, end: b.end, insns }
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_hex_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 0x10);
        assert_eq!(parse_u32("16").unwrap(), 16);
        assert!(parse_u32("zz").is_err());
    }

    #[test]
    fn range_line_renders_big_endian() {
        // MOV #1,R2 ; ADD R3,R2 ; undefined
        let img = Image::from_bytes(0x8000_0000, vec![0xE2, 0x01, 0x32, 0x3C, 0xFF, 0xFF]);
        let arch = Architecture::default();
        assert_eq!(render_line(&arch, &img, 0x8000_0000, false).unwrap(), "0x80000000: MOV #0x1,R2");
        assert_eq!(render_line(&arch, &img, 0x8000_0002, true).unwrap(), "0x80000002: 32 3c   ADD R3,R2");
        assert_eq!(render_line(&arch, &img, 0x8000_0004, false).unwrap(), "0x80000004: .word 0xffff");
        assert!(render_line(&arch, &img, 0x8000_0006, false).is_none());
    }

    #[test]
    fn config_file_and_override() {
        let path = std::env::temp_dir().join("_superh_cfg.json");
        std::fs::write(&path, r#"{"variant":"Sh2e"}"#).unwrap();
        let cfg = load_config(path.to_str(), None).unwrap();
        assert_eq!(cfg.variant, IsaVariant::Sh2e);
        let cfg = load_config(path.to_str(), Some(IsaVariant::Sh1)).unwrap();
        assert_eq!(cfg.variant, IsaVariant::Sh1);
        let _ = std::fs::remove_file(&path);
    }
}
