//! Register renaming demonstration CLI.
//!
//! This binary wires the renaming components together the way a pipeline
//! setup stage would. It performs:
//! 1. **Setup:** Build the capability register class, a CAM of its
//!    identities, a physical register file, and a free list.
//! 2. **Seeding:** Give the first entries an initial mapping.
//! 3. **Renaming:** Remap those destinations and report the bindings.
//! 4. **Storage:** Write capability values through the renamed registers,
//!    read them back, and derive their cache-line numbers.

use clap::Parser;
use std::{fs, process};

use renamesim_core::config::Config;
use renamesim_core::core::free_list::FreeList;
use renamesim_core::core::phys_regfile::PhysRegFile;
use renamesim_core::core::reg_class::{CAP_REG_CLASS_NAME, RegClass, RegClassType, RegIndex, RegVal};
use renamesim_core::core::rename_map::RenameMap;
use renamesim_core::debug;

mod cam;

use cam::Cam;

#[derive(Parser, Debug)]
#[command(
    name = "renamesim",
    version,
    about = "Register renaming demonstration",
    long_about = "Build a capability register class, rename a batch of architectural \
                  destinations onto a physical register file, and store/read values \
                  through the renamed registers.\n\nSizing comes from a JSON config \
                  file (see renamesim_core::config::Config); built-in defaults are \
                  used when none is given."
)]
struct Cli {
    /// JSON configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<String>,

    /// Emit per-rename trace output on stderr.
    #[arg(long)]
    trace: bool,

    /// Print the CAM contents after setup.
    #[arg(long)]
    show_cam: bool,

    /// Print rename statistics at exit.
    #[arg(long)]
    stats: bool,
}

fn load_config(path: &str) -> Config {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read config {path}: {err}");
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: cannot parse config {path}: {err}");
            process::exit(1);
        }
    }
}

fn enable_tracing() {
    debug::global_enable();
    debug::CAP_REGS.enable();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rename=trace")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Packs cache level, line number, and access rights into a capability
/// word (non-secure class of service, first-level cache).
fn make_capability(line: usize) -> RegVal {
    let access_rights: RegVal = 0b0001_1111;
    let cache_level: RegVal = 0b01;
    cache_level << 17 | ((line as RegVal) << 8 | access_rights)
}

/// Extracts the L1 cache line number from a capability word. The L1 holds
/// at most 2^9 = 512 blocks.
fn cache_line_number(cap: RegVal) -> RegVal {
    ((1 << 9) - 1) & (cap >> (9 - 1))
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref().map_or_else(Config::default, load_config);
    if cli.trace || config.general.trace {
        enable_tracing();
    }

    let cap_class = RegClass::new(
        RegClassType::Capability,
        CAP_REG_CLASS_NAME,
        config.rename.num_arch_regs,
        &debug::CAP_REGS,
    );

    let mut cam = Cam::new();
    for id in &cap_class {
        cam.add(id.index(), id);
    }
    if cli.show_cam {
        cam.display();
    }

    // Physical register file for the class, drained into the free list.
    let mut reg_file = PhysRegFile::new(&cap_class, config.rename.num_phys_regs);
    let mut free_list = FreeList::new();
    free_list.add_regs(reg_file.reg_refs());

    let mut rename_map = RenameMap::new();
    rename_map.init(&cap_class, free_list);
    println!(
        "rename map ready: {} architectural registers, {} free physical registers",
        rename_map.num_arch_regs(),
        rename_map.num_free_entries()
    );

    let seeded = config
        .rename
        .seeded_entries
        .min(config.rename.num_arch_regs)
        .min(cam.max_size());

    // Initial mapping for the first entries, so the renames below displace
    // something real.
    for key in 0..seeded {
        let Some(arch) = cam.find(key as RegIndex) else {
            continue;
        };
        let reg = rename_map.free_list_mut().get_reg();
        rename_map.set_entry(arch, reg);
    }

    for key in 0..seeded {
        let Some(arch) = cam.find(key as RegIndex) else {
            continue;
        };
        let info = rename_map.rename(arch, &mut reg_file);
        println!(
            "renamed {arch} to physical reg {} (previous {})",
            info.new_reg, info.prev_reg
        );
    }

    // Load capability values into the renamed registers.
    for key in 0..seeded {
        let Some(arch) = cam.find(key as RegIndex) else {
            continue;
        };
        let phys = rename_map.lookup(arch);
        reg_file.set_reg(phys, make_capability(key));
    }

    // Read them back and derive cache-line numbers.
    for key in 0..seeded {
        let Some(arch) = cam.find(key as RegIndex) else {
            continue;
        };
        let phys = rename_map.lookup(arch);
        let cap = reg_file.get_reg(phys);
        println!(
            "capability {} in physical reg {} (arch reg {arch}) maps to cache line {}",
            cap_class.val_string(&cap.to_le_bytes()),
            phys,
            cache_line_number(cap)
        );
    }

    if cli.stats {
        rename_map.stats().report();
    }
}
