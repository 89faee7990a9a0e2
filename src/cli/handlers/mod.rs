mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use regex::Regex;

/// Global override for the workspace directory (set by -C flag)
static DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::FileLock;
use crate::io::state::{self, UiState};
use crate::io::store::{self, Store, StoreError};
use crate::io::config_io;
use crate::layout::{OverlapInfo, compute_overlap_layout};
use crate::model::TimeBlock;
use crate::ops::{demo, schedule_ops, search, stats, todo_ops};
use crate::util::hours;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    // Store -C override for load_store_cwd()
    if let Some(ref dir) = cli.dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => {
            eprintln!("no subcommand (try `slt --help`)");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before workspace discovery
            Commands::Init(args) => cmd_init(args, cli.dir.as_deref()),

            // Read commands
            Commands::Show(args) => cmd_show(args, json),
            Commands::Categories => cmd_categories(json),
            Commands::Stats(args) => cmd_stats(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Focus(args) => cmd_focus(args),

            // Write commands
            Commands::Add(args) => cmd_add(args, json),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Resize(args) => cmd_resize(args),
            Commands::Memo(args) => cmd_memo(args),
            Commands::Demo(args) => cmd_demo(args),

            // To-dos and config
            Commands::Todo(args) => cmd_todo(args, json),
            Commands::Config(args) => cmd_config(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_store_cwd() -> Result<Store, StoreError> {
    let start = match DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(StoreError::Io)?,
    };
    store::load(&start)
}

fn resolve_date(arg: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s).into()),
    }
}

fn parse_hour_arg(s: &str, what: &str) -> Result<f64, Box<dyn std::error::Error>> {
    hours::parse_hour(s)
        .ok_or_else(|| format!("invalid {} '{}' (try 9, 9.25, or 9:15)", what, s).into())
}

/// A day's blocks in display order.
fn day_blocks_sorted(store: &Store, date: NaiveDate) -> Vec<TimeBlock> {
    let mut blocks = schedule_ops::blocks_for_date(&store.schedule, date);
    schedule_ops::sort_blocks(&mut blocks);
    blocks
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(args: ShowArgs, json: bool) -> CmdResult {
    let store = load_store_cwd()?;
    let registry = store.registry();
    let date = resolve_date(args.date.as_deref())?;

    let blocks = day_blocks_sorted(&store, date);
    let layout = compute_overlap_layout(&blocks);
    let tracked: f64 = blocks.iter().map(|b| b.duration).sum();

    if json {
        let day = DayJson {
            date: date.format("%Y-%m-%d").to_string(),
            tracked_hours: tracked,
            blocks: blocks
                .iter()
                .map(|b| {
                    let info = layout.get(&b.id).copied().unwrap_or_else(OverlapInfo::solo);
                    BlockJson::new(b, info)
                })
                .collect(),
        };
        return print_json(&day);
    }

    if blocks.is_empty() {
        println!("no blocks on {}", date.format("%Y-%m-%d"));
        return Ok(());
    }

    println!(
        "{}  {} block{}, {} tracked",
        date.format("%Y-%m-%d"),
        blocks.len(),
        if blocks.len() == 1 { "" } else { "s" },
        hours::format_duration(tracked),
    );
    println!();
    for block in &blocks {
        let info = layout
            .get(&block.id)
            .copied()
            .unwrap_or_else(OverlapInfo::solo);
        let name = registry.name_of(&block.category_id);
        let icon = registry.icon_of(&block.category_id);
        let mut line = format!(
            "  {}  {} {:<10} {}/{}  {}",
            hours::format_range(block.start_hour, block.duration),
            icon,
            name,
            info.column_index + 1,
            info.total_columns,
            block.id,
        );
        if let Some(memo) = &block.memo {
            line.push_str("  # ");
            line.push_str(memo);
        }
        println!("{}", line);
    }
    Ok(())
}

fn cmd_categories(json: bool) -> CmdResult {
    let store = load_store_cwd()?;
    let registry = store.registry();

    if json {
        let list: Vec<CategoryJson> = registry.iter().map(CategoryJson::from).collect();
        return print_json(&list);
    }

    for category in registry.iter() {
        println!("  {} {:<12} {}", category.icon, category.id, category.name);
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs, json: bool) -> CmdResult {
    let store = load_store_cwd()?;
    let registry = store.registry();
    let date = resolve_date(args.date.as_deref())?;

    let (from, to) = if args.week {
        stats::week_range(date)
    } else if args.month {
        stats::month_range(date)
    } else {
        (date, date)
    };

    let totals = stats::range_totals(&store.schedule, &registry, from, to);
    let tracked = stats::tracked_hours(&store.schedule, from, to);

    if json {
        let out = StatsJson {
            from: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            tracked_hours: tracked,
            totals: totals.iter().map(CategoryTotalJson::from).collect(),
        };
        return print_json(&out);
    }

    if from == to {
        println!("{}  {} tracked", from.format("%Y-%m-%d"), hours::format_duration(tracked));
    } else {
        println!(
            "{} to {}  {} tracked",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            hours::format_duration(tracked),
        );
    }
    println!();
    for total in &totals {
        println!(
            "  {} {:<10} {:>8}  {:>3.0}%  ({} block{})",
            registry.icon_of(&total.category_id),
            registry.name_of(&total.category_id),
            hours::format_duration(total.hours),
            total.share * 100.0,
            total.blocks,
            if total.blocks == 1 { "" } else { "s" },
        );
    }

    // Week view gets a per-day strip under the totals
    if args.week {
        println!();
        for (day, day_hours) in stats::daily_tracked(&store.schedule, from, to) {
            println!("  {}  {:>8}", day.format("%a %d"), hours::format_duration(day_hours));
        }
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> CmdResult {
    let store = load_store_cwd()?;
    let re = Regex::new(&args.pattern)?;

    let mut hits = search::search_schedule(&store.schedule, &re);
    hits.extend(search::search_todos(&store.todos, &re));

    if json {
        let list: Vec<SearchHitJson> = hits
            .iter()
            .map(|h| SearchHitJson {
                kind: match h.field {
                    search::MatchField::Memo => "memo".into(),
                    search::MatchField::TodoTitle => "todo".into(),
                },
                id: h.id.clone(),
                text: h.text.clone(),
            })
            .collect();
        return print_json(&list);
    }

    if hits.is_empty() {
        println!("no matches for '{}'", args.pattern);
        return Ok(());
    }
    for hit in &hits {
        let kind = match hit.field {
            search::MatchField::Memo => "memo",
            search::MatchField::TodoTitle => "todo",
        };
        println!("  {:<5} {:<14} {}", kind, hit.id, hit.text);
    }
    Ok(())
}

fn cmd_focus(args: FocusArgs) -> CmdResult {
    let store = load_store_cwd()?;
    let mut ui_state = state::read_ui_state(&store.dir).unwrap_or_else(|| UiState {
        view: "day".into(),
        ..UiState::default()
    });

    if args.clear {
        ui_state.one_thing = None;
        state::write_ui_state(&store.dir, &ui_state)?;
        println!("focus cleared");
    } else if let Some(text) = args.text {
        ui_state.one_thing = Some(text.clone());
        state::write_ui_state(&store.dir, &ui_state)?;
        println!("focus: {}", text);
    } else {
        match &ui_state.one_thing {
            Some(text) => println!("focus: {}", text),
            None => println!("no focus set"),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> CmdResult {
    let mut store = load_store_cwd()?;
    let registry = store.registry();
    let date = resolve_date(args.date.as_deref())?;
    let start = parse_hour_arg(&args.start, "start time")?;
    let duration = parse_hour_arg(&args.duration, "duration")?;

    let _lock = FileLock::acquire_default(&store.dir)?;
    let block = schedule_ops::add_block(
        &mut store.schedule,
        &registry,
        &args.category,
        date,
        start,
        duration,
        args.memo,
    )?;
    store.save_schedule()?;

    // Report the lane the new block landed in
    let blocks = day_blocks_sorted(&store, date);
    let layout = compute_overlap_layout(&blocks);
    let info = layout
        .get(&block.id)
        .copied()
        .unwrap_or_else(OverlapInfo::solo);

    if json {
        return print_json(&BlockJson::new(&block, info));
    }
    println!(
        "added {}: {} {} {}  lane {}/{}",
        block.id,
        registry.icon_of(&block.category_id),
        registry.name_of(&block.category_id),
        hours::format_range(block.start_hour, block.duration),
        info.column_index + 1,
        info.total_columns,
    );
    Ok(())
}

fn cmd_rm(args: RmArgs) -> CmdResult {
    let mut store = load_store_cwd()?;
    let _lock = FileLock::acquire_default(&store.dir)?;
    let removed = schedule_ops::remove_block(&mut store.schedule, &args.id)?;
    store.save_schedule()?;
    println!(
        "removed {}: {}",
        removed.id,
        hours::format_range(removed.start_hour, removed.duration),
    );
    Ok(())
}

fn cmd_mv(args: MvArgs) -> CmdResult {
    let mut store = load_store_cwd()?;
    let start = parse_hour_arg(&args.start, "start time")?;
    let date = match args.date.as_deref() {
        Some(s) => Some(resolve_date(Some(s))?),
        None => None,
    };

    let _lock = FileLock::acquire_default(&store.dir)?;
    schedule_ops::move_block(&mut store.schedule, &args.id, start, date)?;
    store.save_schedule()?;
    println!("moved {} to {}", args.id, hours::format_hour(start));
    Ok(())
}

fn cmd_resize(args: ResizeArgs) -> CmdResult {
    let mut store = load_store_cwd()?;
    let duration = parse_hour_arg(&args.duration, "duration")?;

    let _lock = FileLock::acquire_default(&store.dir)?;
    schedule_ops::resize_block(&mut store.schedule, &args.id, duration)?;
    store.save_schedule()?;
    println!("resized {} to {}", args.id, hours::format_duration(duration));
    Ok(())
}

fn cmd_memo(args: MemoArgs) -> CmdResult {
    let mut store = load_store_cwd()?;
    let memo = if args.clear { None } else { args.text };
    if memo.is_none() && !args.clear {
        return Err("provide memo text or --clear".into());
    }

    let _lock = FileLock::acquire_default(&store.dir)?;
    let cleared = memo.is_none();
    schedule_ops::set_memo(&mut store.schedule, &args.id, memo)?;
    store.save_schedule()?;
    if cleared {
        println!("cleared memo on {}", args.id);
    } else {
        println!("set memo on {}", args.id);
    }
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> CmdResult {
    let mut store = load_store_cwd()?;
    let from = resolve_date(args.from.as_deref())?;
    let to = from + chrono::Days::new(args.days.saturating_sub(1) as u64);

    let existing = store
        .schedule
        .blocks
        .iter()
        .filter(|b| b.date >= from && b.date <= to)
        .count();
    if existing > 0 && !args.force {
        return Err(format!(
            "range already has {} block{} (use --force to replace)",
            existing,
            if existing == 1 { "" } else { "s" },
        )
        .into());
    }

    let _lock = FileLock::acquire_default(&store.dir)?;
    if args.force {
        store
            .schedule
            .blocks
            .retain(|b| b.date < from || b.date > to);
    }
    let generated = demo::generate(args.seed, from, args.days);
    let count = generated.len();
    store.schedule.blocks.extend(generated);
    store.save_schedule()?;

    println!(
        "seeded {} blocks across {} day{} from {} (seed {})",
        count,
        args.days,
        if args.days == 1 { "" } else { "s" },
        from.format("%Y-%m-%d"),
        args.seed,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// To-dos
// ---------------------------------------------------------------------------

fn cmd_todo(cmd: TodoCmd, json: bool) -> CmdResult {
    match cmd.action {
        None => cmd_todo_list(TodoListArgs { all: false }, json),
        Some(TodoAction::List(args)) => cmd_todo_list(args, json),
        Some(TodoAction::Add(args)) => cmd_todo_add(args, json),
        Some(TodoAction::Done(args)) => cmd_todo_done(args),
        Some(TodoAction::Rm(args)) => cmd_todo_rm(args),
    }
}

fn cmd_todo_list(args: TodoListArgs, json: bool) -> CmdResult {
    let store = load_store_cwd()?;
    let registry = store.registry();

    if json {
        let list: Vec<TodoJson> = store
            .todos
            .items
            .iter()
            .filter(|t| args.all || !t.done)
            .map(TodoJson::from)
            .collect();
        return print_json(&list);
    }

    let groups = todo_ops::grouped_by_category(&store.todos, &registry);
    let mut printed = 0;
    for (category, items) in groups {
        let visible: Vec<_> = items.iter().filter(|t| args.all || !t.done).collect();
        if visible.is_empty() {
            continue;
        }
        match category {
            Some(c) => println!("{} {}", c.icon, c.name),
            None => println!("(no category)"),
        }
        for todo in visible {
            println!(
                "  [{}] {:<5} {}",
                if todo.done { 'x' } else { ' ' },
                todo.id,
                todo.title,
            );
            printed += 1;
        }
    }
    if printed == 0 {
        println!("nothing to do");
    }
    Ok(())
}

fn cmd_todo_add(args: TodoAddArgs, json: bool) -> CmdResult {
    let mut store = load_store_cwd()?;
    let registry = store.registry();
    let today = chrono::Local::now().date_naive();

    let _lock = FileLock::acquire_default(&store.dir)?;
    let todo = todo_ops::add_todo(
        &mut store.todos,
        &registry,
        &args.title,
        args.category.as_deref(),
        today,
    )?;
    store.save_todos()?;

    if json {
        return print_json(&TodoJson::from(&todo));
    }
    println!("added {}: {}", todo.id, todo.title);
    Ok(())
}

fn cmd_todo_done(args: TodoIdArg) -> CmdResult {
    let mut store = load_store_cwd()?;
    let _lock = FileLock::acquire_default(&store.dir)?;
    let done = todo_ops::toggle_todo(&mut store.todos, &args.id)?;
    store.save_todos()?;
    println!("{} {}", args.id, if done { "done" } else { "reopened" });
    Ok(())
}

fn cmd_todo_rm(args: TodoIdArg) -> CmdResult {
    let mut store = load_store_cwd()?;
    let _lock = FileLock::acquire_default(&store.dir)?;
    let removed = todo_ops::remove_todo(&mut store.todos, &args.id)?;
    store.save_todos()?;
    println!("removed {}: {}", removed.id, removed.title);
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(cmd: ConfigCmd) -> CmdResult {
    let store = load_store_cwd()?;
    match cmd.action {
        ConfigAction::Get(args) => {
            let value = config_io::get_value(&store.dir, &args.key)?;
            println!("{}", value);
        }
        ConfigAction::Set(args) => {
            let _lock = FileLock::acquire_default(&store.dir)?;
            config_io::set_value(&store.dir, &args.key, &args.value)?;
            println!("{} = {}", args.key, args.value);
        }
    }
    Ok(())
}
