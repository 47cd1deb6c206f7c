//! Benchmarks for table minimisation and the expression pipeline
//!
//! Tables are filled from a fixed xorshift sequence so runs are comparable.

use automaton_logic::automaton::{AutomatonNode, MinimizationLevel, Transition};
use automaton_logic::{
    Automaton, Espresso, ExpressionParser, LogicNode, LogicRoot, Minimizable,
    MinimizerEngine, OperatorSet, SymbolTable, TruthTable,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

/// Single output table with roughly 40% ones and 10% don't-cares
fn random_table(inputs: usize, seed: u64) -> TruthTable {
    let mut rng = XorShift(seed);
    let mut table = TruthTable::new(inputs, 1).unwrap();
    for row in 0..table.rows() {
        match rng.next() % 10 {
            0..=3 => table.set_output_one(row, 0).unwrap(),
            4 => table.set_dont_care_one(row).unwrap(),
            _ => {}
        }
    }
    table
}

fn symbols(inputs: usize) -> SymbolTable {
    (0..inputs).fold(SymbolTable::new(OperatorSet::default()), |s, i| {
        s.with_input(i, &format!("in{}", i))
    })
}

fn bench_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("truth_table");
    for inputs in [4, 6, 8, 10] {
        let table = random_table(inputs, 0x9E37_79B9_7F4A_7C15 ^ inputs as u64);
        group.throughput(Throughput::Elements(table.rows()));

        let heuristic = Espresso::default();
        group.bench_with_input(BenchmarkId::new("heuristic", inputs), &table, |b, t| {
            b.iter(|| heuristic.minimize_table(black_box(t)).unwrap())
        });

        if inputs <= 8 {
            let exact = Espresso::exact();
            group.bench_with_input(BenchmarkId::new("exact", inputs), &table, |b, t| {
                b.iter(|| exact.minimize_table(black_box(t)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let symbols = symbols(6);
    let parser = ExpressionParser::for_symbols(&symbols);
    let text = "in0&in1&/in2 + in0&/in1&/in2 + /in3&(in4+in5) + in3&in4&in5 + /(in0+in1)&in2";
    let engine = Espresso::default();

    let mut group = c.benchmark_group("pipeline");
    group.bench_function("parse", |b| {
        b.iter(|| parser.parse(black_box(text), &symbols, None).unwrap())
    });
    let root = parser.parse(text, &symbols, None).unwrap();
    group.bench_function("minimize", |b| {
        b.iter(|| black_box(&root).minimize(&engine).unwrap())
    });
    group.bench_function("parse_minimize_render", |b| {
        b.iter(|| {
            let root = parser.parse(black_box(text), &symbols, None).unwrap();
            root.minimize(&engine).unwrap().to_custom_string(&symbols)
        })
    });
    group.finish();
}

/// Ring counter over `states` nodes advancing on input 0
fn ring(states: usize) -> Automaton {
    let step = LogicRoot::new(LogicNode::input(0));
    let hold = LogicRoot::new(LogicNode::not(LogicNode::input(0)));
    (0..states).fold(Automaton::new(0, "ring"), |a, s| {
        a.with_node(AutomatonNode::new(s, s).with_output(s % 4, step.clone()))
            .with_transition(Transition::new(s, (s + 1) % states, step.clone()))
            .with_transition(Transition::new(s, s, hold.clone()))
    })
}

fn bench_automaton(c: &mut Criterion) {
    let engine = Espresso::default();
    let mut group = c.benchmark_group("automaton");
    for states in [4, 8, 16] {
        let automaton = ring(states);
        let symbols = SymbolTable::new(OperatorSet::default())
            .with_input(0, "step")
            .with_automaton(0, "ring")
            .with_z_variables(0, automaton.z_variable_count());
        let set = automaton.equation_set(&[0, 1, 2, 3], &[]).unwrap();

        group.bench_with_input(BenchmarkId::new("equations", states), &set, |b, set| {
            b.iter(|| {
                set.render(&symbols, &engine, MinimizationLevel::Minimized, None)
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("checks", states), &automaton, |b, a| {
            b.iter(|| {
                a.completeness_reports(&engine).unwrap();
                a.contradiction_reports(&engine).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tables, bench_pipeline, bench_automaton);
criterion_main!(benches);
