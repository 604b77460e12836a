use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use superh_rs::disasm::tokens_to_string;
use superh_rs::{ArchConfig, Architecture, IsaVariant};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decode SuperH opcodes: text, control flow and IL"
)]
struct Opts {
    /// ISA variant (overrides --config)
    #[arg(long, value_enum)]
    isa: Option<IsaVariant>,
    /// JSON ArchConfig file
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
    /// Address of the first opcode (hex or dec)
    #[arg(long, default_value = "0")]
    addr: String,
    /// Fuse delayed branches with the following opcode
    #[arg(long)]
    fuse: bool,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
    /// 16-bit opcodes in hex, e.g. 000b 0009
    #[arg(value_name = "OPCODE", required = true)]
    opcodes: Vec<String>,
}

#[derive(serde::Serialize)]
struct Report {
    addr: u32,
    opcode: u16,
    text: Option<String>,
    info: Option<superh_rs::InstructionInfo>,
    lifted: Option<superh_rs::Lifted>,
    error: Option<String>,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn parse_opcode(s: &str) -> Result<u16> {
    let s = s.trim();
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u16::from_str_radix(hex, 16).with_context(|| format!("bad opcode {s:?}"))
}

fn load_config(opts: &Opts) -> Result<ArchConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let txt = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&txt)?
        }
        None => ArchConfig::default(),
    };
    if let Some(v) = opts.isa {
        cfg.variant = v;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let arch = Architecture::new(load_config(&opts)?);
    let base = parse_u32(&opts.addr)?;
    let words = opts.opcodes.iter().map(|s| parse_opcode(s)).collect::<Result<Vec<_>>>()?;

    let mut reports = Vec::new();
    let mut i = 0usize;
    while i < words.len() {
        let addr = base.wrapping_add(2 * i as u32);
        let bytes = words[i].to_be_bytes();
        let mut rep = Report { addr, opcode: words[i], text: None, info: None, lifted: None, error: None };
        match arch.info(bytes, addr) {
            Ok(info) => {
                let lifted = match words.get(i + 1) {
                    Some(next) if opts.fuse && info.has_delay_slot() => arch.lift_with_slot(bytes, next.to_be_bytes(), addr)?,
                    _ => arch.lift(bytes, addr)?,
                };
                let (_, tokens) = arch.text(bytes, addr)?;
                rep.text = Some(tokens_to_string(&tokens));
                rep.info = Some(info);
                i += (lifted.length / 2) as usize;
                rep.lifted = Some(lifted);
            }
            Err(e) => {
                rep.error = Some(e.to_string());
                i += 1;
            }
        }
        reports.push(rep);
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for rep in &reports {
        match (&rep.text, &rep.error) {
            (Some(text), _) => println!("{:#010x}: {:04x}  {text}", rep.addr, rep.opcode),
            (None, Some(err)) => println!("{:#010x}: {:04x}  .word ; {err}", rep.addr, rep.opcode),
            _ => {}
        }
        if let Some(info) = &rep.info {
            for b in &info.branches {
                println!("    branch {:?} -> {:?} delay={}", b.kind, b.target, b.delay_slot);
            }
        }
        if let Some(lifted) = &rep.lifted {
            for op in &lifted.ops {
                println!("    {op:?}");
            }
        }
    }
    Ok(())
}
