use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::store;

/// `slt init` — create a slate/ workspace in the current (or -C) directory.
pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let created = store::init_dir(&root, args.force)?;
    println!("initialized slate workspace at {}", created.display());
    println!("try: slt add study 9:00 2  (then `slt` for the TUI)");
    Ok(())
}
