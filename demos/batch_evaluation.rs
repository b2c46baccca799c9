use scicalc_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3 * 4",
        "ans ^ 2",
        "sqrt(ans)",
        "ans % 5",
        "fact(ans)",
        "root(ans, 3)",
    ];

    let mut calculator = Calculator::new(100);
    let mut previous_answer = None;

    for expr in expressions {
        match calculator.evaluate(expr, previous_answer) {
            Ok(value) => {
                println!("{expr} = {value}");
                previous_answer = Some(value);
            }
            Err(err) => println!("{expr}: {err}"),
        }
    }
}
