use log::debug;
use scicalc_rs::expr::{evaluate_postfix, to_postfix, Tokenizer};

fn main() {
    pretty_env_logger::init();

    let expr = "sqrt(16) + root(27, 3) * 2";

    // Run the three stages by hand; RUST_LOG=debug shows each boundary.
    let tokens = Tokenizer::tokenize(expr, None).unwrap();
    debug!("tokens: {tokens:?}");
    let postfix = to_postfix(&tokens).unwrap();
    debug!("postfix: {postfix:?}");
    let value = evaluate_postfix(&postfix).unwrap();
    debug!("raw value: {value}");

    let result = scicalc_rs::evaluate_expression(expr, None).unwrap();
    println!("{expr} = {result}");
}
