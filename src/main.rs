use std::env;
use std::io;
use std::process;

use htnorm::{asp, filter, nnf, norm, parser, pnf};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let input = if args.is_empty() {
        println!("Input a formula in RPN:");
        let mut raw_input = String::new();
        if let Err(err) = io::stdin().read_line(&mut raw_input) {
            eprintln!("input failed: {}", err);
            process::exit(1);
        }
        raw_input
    } else {
        args.join(" ")
    };

    let expr = match parser::parse(input.trim()) {
        Ok(e) => e,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    // first-order inputs get prenexed; only the matrix is normalized
    let expr = pnf::pnf(expr);
    if !pnf::prefix(&expr).is_empty() {
        println!("pnf: {}", expr.to_rpn());
    }
    let matrix = nnf::nnf(pnf::matrix(&expr).clone());

    let rules = norm::normalize(&matrix);
    for rule in &rules {
        println!("{}", rule);
    }
    for rule in &filter::minimize(&rules) {
        println!("{}", asp::to_asp(rule));
    }
}
