use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use optimo_parser::parse;
use optimo_solver::{solve_ilp, solve_ilp_with_steps};

fn main() {
    let args: Vec<String> = env::args().collect();

    let (json, input) = match args.len() {
        2 if args[1] == "--help" || args[1] == "-h" => {
            print_usage(&args[0]);
            return;
        }
        2 => (false, args[1].clone()),
        3 if args[1] == "--json" => (true, args[2].clone()),
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let text = match read_input(&input) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error reading '{}': {}", input, err);
            process::exit(1);
        }
    };

    let problem = match parse(&text) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("Parse error: {}", err);
            process::exit(1);
        }
    };

    let result = if json {
        solve_ilp_with_steps(&problem)
    } else {
        solve_ilp(&problem)
    };

    match result {
        Ok(solution) if json => match serde_json::to_string_pretty(&solution) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => {
                eprintln!("Error rendering solution: {}", err);
                process::exit(1);
            }
        },
        Ok(solution) => {
            for (i, value) in solution.values.iter().enumerate() {
                println!("x{}={}", i + 1, value);
            }
            println!("Z={}", solution.objective);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn read_input(path: &str) -> Result<String, io::Error> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
    }
}

fn print_usage(program_name: &str) {
    eprintln!("Optimo - Integer linear program solver");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} <file>             # Solve a problem file", program_name);
    eprintln!("  {} -                  # Read the problem from stdin", program_name);
    eprintln!("  {} --json <file|->    # Emit the solution and tableau trail as JSON", program_name);
    eprintln!();
    eprintln!("Problem format:");
    eprintln!("  max 3 5");
    eprintln!("  1 0 <= 4");
    eprintln!("  0 2 <= 12");
    eprintln!("  3 2 <= 18");
}
