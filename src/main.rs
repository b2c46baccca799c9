use std::io::{self, BufRead, Write};

use scicalc_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    println!("What would you like to calculate? (type q to quit)");

    let mut calculator = Calculator::new(100);
    let mut previous_answer: Option<f64> = None;

    let stdin = io::stdin();
    loop {
        print!("--> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let input = line.trim();
        if input == "q" || input == "Q" {
            break;
        }

        match calculator.evaluate(input, previous_answer) {
            Ok(value) => {
                previous_answer = Some(value);
                println!("{value}");
            }
            Err(err) => println!("{err}"),
        }
    }
}
