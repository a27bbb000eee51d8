use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skimskript::{
    interpreter::{lexer::tokenize, parser::core::parse_program},
    parse_source,
};

const PROGRAM: &str = r#"
define int function fibonacci(int n) {
    if n is less than 2 {
        return n
    }
    return fibonacci(n - 1) + fibonacci(n - 2)
}

define function accumulate(ref float total, float amount) {
    set total to total + amount
}

declare float sum as 0
declare int index as 0
while index is at most 100 {
    if index mod 15 is 0 {
        print("FizzBuzz")
    } else if index mod 3 is 0 {
        print("Fizz")
    } otherwise if index mod 5 is 0 {
        print("Buzz")
    } else {
        run accumulate(sum, index * 1.5)
    }
    set index to index + 1
}
assert sum is greater than or equal to 0 and fibonacci(10) is 55
"#;

fn workload(copies: usize) -> Vec<String> {
    let lines: Vec<&str> = PROGRAM.lines().collect();
    let mut source = Vec::with_capacity(lines.len() * copies);
    // Function and global names must stay unique across copies.
    for copy in 0..copies {
        source.extend(lines.iter().map(|line| {
                                      ["fibonacci", "accumulate", "sum", "index"].iter()
                                                                                 .fold((*line).to_string(), |line, name| {
                                                                                     line.replace(name, &format!("{name}{copy}"))
                                                                                 })
                                  }));
    }
    source
}

fn bench_frontend(c: &mut Criterion) {
    for (label, copies) in [("small", 1), ("large", 50)] {
        let source = workload(copies);
        let stream = tokenize(&source).expect("tokenize");

        c.bench_function(&format!("frontend_tokenize_{label}"), |b| {
            b.iter(|| {
                let out = tokenize(black_box(&source)).expect("tokenize");
                black_box(out);
            })
        });

        c.bench_function(&format!("frontend_parse_only_{label}"), |b| {
            b.iter(|| {
                let out = parse_program(black_box(&stream)).expect("parse");
                black_box(out);
            })
        });

        c.bench_function(&format!("frontend_tokenize_parse_analyze_{label}"), |b| {
            b.iter(|| {
                let out = parse_source(black_box(&source)).expect("parse");
                black_box(out);
            })
        });
    }
}

criterion_group!(benches, bench_frontend);
criterion_main!(benches);
