use std::{env, process, sync::Arc};

use colored::Colorize;
use uuid::Uuid;

use budget_split::{
    domain::{BudgetState, CategoryName},
    init,
    share::{decode, encode, preview, share_url},
    state::BudgetStore,
    storage::{CurrentBudgetStore, JsonFileBackend, SavedBudgetStore, StorageBackend},
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("{} {err}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let args: Vec<String> = args.collect();

    let backend: Arc<dyn StorageBackend> = Arc::new(JsonFileBackend::new_default()?);

    match command.as_str() {
        "show" => {
            let store = BudgetStore::open(backend);
            print_summary(store.state());
        }
        "add" => {
            let (category, label, amount) = parse_item_args(&args);
            let mut store = BudgetStore::open(backend);
            store.add_item(category, label, amount);
            println!("{} {label} {amount} to {category}", "Added".green());
        }
        "remove" => {
            let category = parse_category(args.first());
            let item_id = parse_id(args.get(1));
            let mut store = BudgetStore::open(backend);
            let known = store.state().categories.get(category).item(item_id).is_some();
            store.remove_item(category, item_id);
            if known {
                println!("{} item {item_id} from {category}", "Removed".green());
            } else {
                println!("No item {item_id} in {category}; nothing removed.");
            }
        }
        "targets" => {
            let targets = parse_targets(&args);
            let mut store = BudgetStore::open(backend);
            store.set_target_percentages(targets);
            let applied = store.state().target_percentages;
            if applied == targets.clamped() {
                println!(
                    "{} targets to {}/{}/{}",
                    "Set".green(),
                    applied.needs,
                    applied.wants,
                    applied.savings
                );
            } else {
                println!("Targets must sum to 100; left unchanged.");
            }
        }
        "name" => {
            let name = args.first().cloned().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let mut store = BudgetStore::open(backend);
            store.set_current_budget_name(Some(name.clone()));
            println!("{} current budget \"{name}\"", "Named".green());
        }
        "clear" => {
            let mut store = BudgetStore::open(backend.clone());
            store.clear_all();
            CurrentBudgetStore::new(backend).wipe();
            println!("{} current budget", "Cleared".green());
        }
        "share" => {
            let store = BudgetStore::open(backend);
            match args.first() {
                Some(base) => println!("{}", share_url(base, store.state())?),
                None => println!("{}", encode(store.state())?),
            }
        }
        "preview" => {
            let code = args.first().map(String::as_str).unwrap_or_default();
            match decode(code) {
                Some(data) => print_preview(&preview(&data)),
                None => {
                    eprintln!("{} invalid budget code", "Error:".red().bold());
                    process::exit(1);
                }
            }
        }
        "import" => {
            let code = args.first().map(String::as_str).unwrap_or_default();
            match decode(code) {
                Some(data) => {
                    let mut store = BudgetStore::open(backend);
                    store.import_budget(data);
                    println!("{} budget from code", "Imported".green());
                    print_summary(store.state());
                }
                None => {
                    eprintln!("{} invalid budget code", "Error:".red().bold());
                    process::exit(1);
                }
            }
        }
        "save" => {
            let name = args.first().cloned().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let store = BudgetStore::open(backend.clone());
            let saved = SavedBudgetStore::new(backend);
            let record = saved.save(name, store.state());
            println!("{} \"{}\" ({})", "Saved".green(), record.name, record.id);
        }
        "saved" => {
            let saved = SavedBudgetStore::new(backend);
            let list = saved.list();
            if list.is_empty() {
                println!("No saved budgets.");
            }
            for entry in list {
                println!(
                    "{}  {}  saved {}",
                    entry.id,
                    entry.name.bold(),
                    entry.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        "load" => {
            let id = parse_id(args.first());
            let saved = SavedBudgetStore::new(backend.clone());
            match saved.get(id) {
                Some(entry) => {
                    let mut store = BudgetStore::open(backend);
                    store.import_budget(entry.data);
                    store.set_current_budget_name(Some(entry.name.clone()));
                    println!("{} \"{}\"", "Loaded".green(), entry.name);
                }
                None => {
                    eprintln!("{} no saved budget {id}", "Error:".red().bold());
                    process::exit(1);
                }
            }
        }
        "rename" => {
            let id = parse_id(args.first());
            let name = args.get(1).cloned().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let saved = SavedBudgetStore::new(backend);
            match saved.rename(id, name) {
                Some(entry) => println!("{} to \"{}\"", "Renamed".green(), entry.name),
                None => {
                    eprintln!("{} no saved budget {id}", "Error:".red().bold());
                    process::exit(1);
                }
            }
        }
        "delete" => {
            let id = parse_id(args.first());
            let saved = SavedBudgetStore::new(backend);
            if saved.delete(id) {
                println!("{} saved budget {id}", "Deleted".green());
            } else {
                eprintln!("{} no saved budget {id}", "Error:".red().bold());
                process::exit(1);
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_summary(state: &BudgetState) {
    if let Some(name) = &state.current_budget_name {
        println!("{}", name.bold());
    }
    for category in CategoryName::ALL {
        let total = state.total_for(category);
        let target = state
            .target_percentages
            .for_category(category)
            .map(|target| format!("  target {target}%"))
            .unwrap_or_default();
        println!(
            "{:<8} {:>12.2}  ({:.1}% of income){}",
            category.to_string(),
            total,
            state.percentage_of_income(category),
            target
        );
        for item in &state.categories.get(category).items {
            println!("  {}  {:<24} {:>10.2}", item.id, item.label, item.amount);
        }
    }
    println!(
        "{:<8} {:>12.2}",
        "left".bold().to_string(),
        state.unbudgeted_amount()
    );
}

fn print_preview(summary: &budget_split::share::BudgetPreview) {
    for category in CategoryName::ALL {
        let entry = summary.get(category);
        println!(
            "{:<8} {:>12.2}  ({} items)",
            category.to_string(),
            entry.total,
            entry.item_count
        );
    }
    if summary.has_custom_targets {
        println!("Uses custom target percentages.");
    }
}

fn parse_item_args(args: &[String]) -> (CategoryName, &str, f64) {
    let category = parse_category(args.first());
    let label = args.get(1).map(String::as_str).unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let amount = args
        .get(2)
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or_else(|| {
            print_usage();
            process::exit(1);
        });
    (category, label, amount)
}

fn parse_category(raw: Option<&String>) -> CategoryName {
    raw.and_then(|raw| CategoryName::parse(raw)).unwrap_or_else(|| {
        eprintln!(
            "{} category must be one of needs, wants, savings, income",
            "Error:".red().bold()
        );
        process::exit(1);
    })
}

fn parse_id(raw: Option<&String>) -> Uuid {
    raw.and_then(|raw| Uuid::parse_str(raw).ok()).unwrap_or_else(|| {
        eprintln!("{} expected a budget/item id", "Error:".red().bold());
        process::exit(1);
    })
}

fn parse_targets(args: &[String]) -> budget_split::domain::TargetPercentages {
    let component = |index: usize| {
        args.get(index)
            .and_then(|raw| raw.parse::<u8>().ok())
            .unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            })
    };
    budget_split::domain::TargetPercentages::new(component(0), component(1), component(2))
}

fn print_usage() {
    eprintln!(
        "Usage: budget_split_cli <command>\n\
         Commands:\n  \
         show\n  \
         add <category> <label> <amount>\n  \
         remove <category> <item-id>\n  \
         targets <needs> <wants> <savings>\n  \
         name <name>\n  \
         clear\n  \
         share [base-url]\n  \
         preview <code>\n  \
         import <code>\n  \
         save <name>\n  \
         saved\n  \
         load <saved-id>\n  \
         rename <saved-id> <name>\n  \
         delete <saved-id>"
    );
}
