//! CLI mínima sobre el motor de recetas.
//!
//! `suite bake --recipe <r.json> --in <file> [--out <file>]`
//! `suite invert --recipe <r.json> --out <inv.json>`
//! `suite keygen [--out <file>]`
//!
//! Códigos de salida: 0 ok, 2 uso, 3 input inválido, 4 fallo de
//! procesamiento, 5 E/S.

use std::path::PathBuf;
use std::process;

use suite_core::{load_inverted_recipe, load_recipe, save_recipe, PipelineEngine, PipelineOutcome, Recipe};
use suite_ops::asymmetric;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("bake") => cmd_bake(&args[2..]),
        Some("invert") => cmd_invert(&args[2..]),
        Some("keygen") => cmd_keygen(&args[2..]),
        _ => {
            eprintln!("Uso: suite <bake|invert|keygen> [opciones]");
            eprintln!("  bake   --recipe <r.json> --in <file> [--out <file>]");
            eprintln!("  invert --recipe <r.json> --out <inv.json>");
            eprintln!("  keygen [--out <file>]");
            process::exit(2);
        }
    }
}

fn flag(args: &[String], name: &str) -> Option<PathBuf> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == name {
            i += 1;
            if i < args.len() {
                return Some(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }
    None
}

fn cmd_bake(args: &[String]) {
    let (recipe_path, input_path) = match (flag(args, "--recipe"), flag(args, "--in")) {
        (Some(r), Some(i)) => (r, i),
        _ => {
            eprintln!("Uso: suite bake --recipe <r.json> --in <file> [--out <file>]");
            process::exit(2);
        }
    };

    let recipe = load_recipe_or_exit("bake", &recipe_path);
    let input = match std::fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("[suite bake] cannot read {}: {e}", input_path.display());
            process::exit(5);
        }
    };

    let mut engine = PipelineEngine::new();
    match engine.bake(&recipe, input.trim_end_matches('\n')) {
        PipelineOutcome::Success { output } => match flag(args, "--out") {
            Some(out_path) => {
                if let Err(e) = std::fs::write(&out_path, &output) {
                    eprintln!("[suite bake] cannot write {}: {e}", out_path.display());
                    process::exit(5);
                }
            }
            None => println!("{output}"),
        },
        PipelineOutcome::Failure { step: Some(failed), message } => {
            eprintln!("[suite bake] {failed}: {message}");
            process::exit(4);
        }
        PipelineOutcome::Failure { step: None, message } => {
            eprintln!("[suite bake] {message}");
            process::exit(4);
        }
        PipelineOutcome::EndOfRecipe => unreachable!("bake never wraps"),
    }
}

fn cmd_invert(args: &[String]) {
    let (recipe_path, out_path) = match (flag(args, "--recipe"), flag(args, "--out")) {
        (Some(r), Some(o)) => (r, o),
        _ => {
            eprintln!("Uso: suite invert --recipe <r.json> --out <inv.json>");
            process::exit(2);
        }
    };

    let (inverse, warnings) = match load_inverted_recipe(&recipe_path) {
        Ok(pair) => pair,
        Err(e) => exit_load_error("invert", &recipe_path, e),
    };
    for warning in &warnings {
        eprintln!("[suite invert] {warning}");
    }
    if let Err(e) = save_recipe(&out_path, &inverse) {
        eprintln!("[suite invert] cannot write {}: {e}", out_path.display());
        process::exit(5);
    }
}

fn cmd_keygen(args: &[String]) {
    let block = match asymmetric::generate_key_pair() {
        Ok(block) => block,
        Err(e) => {
            eprintln!("[suite keygen] {e}");
            process::exit(4);
        }
    };
    match flag(args, "--out") {
        Some(out_path) => {
            if let Err(e) = std::fs::write(&out_path, &block) {
                eprintln!("[suite keygen] cannot write {}: {e}", out_path.display());
                process::exit(5);
            }
        }
        None => println!("{block}"),
    }
}

fn load_recipe_or_exit(cmd: &str, path: &PathBuf) -> Recipe {
    match load_recipe(path) {
        Ok(recipe) => recipe,
        Err(e) => exit_load_error(cmd, path, e),
    }
}

fn exit_load_error(cmd: &str, path: &PathBuf, error: suite_core::PipelineError) -> ! {
    use suite_core::PipelineError;
    let code = match &error {
        PipelineError::Io(_) => 5,
        _ => 3,
    };
    eprintln!("[suite {cmd}] {}: {error}", path.display());
    process::exit(code);
}
