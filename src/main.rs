// cexplain: Line-by-line C code explainer with symbolic memory simulation

use std::fs;
use std::path::Path;
use std::process;

use cexplain::Explainer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("cexplain")
        .to_string();

    let mut as_json = false;
    let mut input: Option<String> = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => as_json = true,
            other if input.is_none() => input = Some(other.to_string()),
            other => {
                eprintln!("Error: Unexpected argument '{}'", other);
                eprintln!();
                print_usage(&program_name);
                process::exit(1);
            }
        }
    }

    let Some(input) = input else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(&program_name);
        process::exit(1);
    };

    if !Path::new(&input).exists() {
        eprintln!("Error: File '{}' not found", input);
        process::exit(1);
    }

    let source = fs::read_to_string(&input)?;

    let mut explainer = Explainer::new();
    let records = explainer.explain(&source);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        println!("line {:>3} | {}", record.line, record.code);
        println!("         | {}", record.explanation);
        if let Some(info) = &record.memory_info {
            if let Some(address) = &info.address {
                println!("         |   address: {}", address);
            }
            if let Some(value) = &info.value {
                println!("         |   value:   {}", value);
            }
            if let Some(binary) = &info.binary {
                println!("         |   binary:  {}", binary);
            }
            if let Some(var_type) = &info.var_type {
                println!("         |   type:    {}", var_type);
            }
        }
        println!();
    }

    let layout = explainer.memory_layout();
    println!(
        "Memory layout: {} variable(s), {} byte(s) total",
        layout.variable_count, layout.total_bytes
    );
    for block in &layout.blocks {
        let value = block.value.as_deref().unwrap_or("uninitialized");
        println!(
            "  {} @ {} ({} bytes, {}) = {}",
            block.name, block.address, block.size_bytes, block.var_type, value
        );
    }

    Ok(())
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.c> [--json]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/hello.c           # Explain a program line by line",
        program_name
    );
    eprintln!(
        "  {} myprogram.c --json      # Dump the records as JSON",
        program_name
    );
}
