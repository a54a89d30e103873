//! Offline program file commands

use std::path::Path;

use shiftlight_core::{evaluate, Program, ProgramFile, VariableTable, MAX_FRAMES};

/// Load a program file and print its variables, frames and diagnostics
pub fn run_check(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::from_file(file)?;

    println!("Program: {}", file.display());
    println!();
    println!("Variables ({}):", program.variables.len());
    for (name, value) in program.variables.iter() {
        println!("  {:<20} {}", name, value);
    }

    println!();
    println!("Frames ({} of {}):", program.animation.len(), MAX_FRAMES);
    let entries = program.animation.entries();
    for (index, (entry, resolved)) in entries.iter().zip(program.resolved_frames()).enumerate() {
        println!("  {:>2}: {}", index, entry.source());
        match resolved {
            Ok(frame) => println!("      Evaluated: {}", frame.encode()),
            Err(e) => println!("      Error: {}", e),
        }
    }

    print_rejected(&program);
    Ok(())
}

/// Print the frame lines that were dropped while loading
pub fn print_rejected(program: &Program) {
    if program.rejected.is_empty() {
        return;
    }
    println!();
    println!("Rejected lines ({}):", program.rejected.len());
    for rejected in &program.rejected {
        println!("  frame line {}: {}", rejected.index + 1, rejected.line);
        println!("      {}", rejected.error);
    }
}

/// Evaluate an expression, optionally against the variables of a program file
pub fn run_eval(expr: &str, vars: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let table = match vars {
        Some(path) => {
            let file = ProgramFile::from_file(path)?;
            VariableTable::parse(&file.variables_text())?
        }
        None => VariableTable::new(),
    };

    let value = evaluate(expr, &table)?;
    println!("{}", value);
    Ok(())
}
