use criterion::{Criterion, criterion_group, criterion_main};
use crossword_solver::crossword::parse::parse_structure;
use crossword_solver::crossword::solver::{CrosswordProblem, CrosswordSolver};
use crossword_solver::crossword::words::WordList;
use crossword_solver::csp::ac3::enforce_arc_consistency;
use std::hint::black_box;

const RING_STRUCTURE: &str = "___\n_#_\n___";

const LATTICE_STRUCTURE: &str = "_____\n_#_#_\n_____\n_#_#_\n_____";

const RING_WORDS: &[&str] = &["CAT", "COD", "TEN", "DEN", "DOG", "BED", "SUN"];

const LATTICE_WORDS: &[&str] = &[
    "APPLE", "BREAD", "CRANE", "DRIVE", "EAGLE", "FLAME", "GRAPE", "HOUSE", "INPUT", "JUICE",
    "KNIFE", "LEMON", "MANGO", "NIGHT", "OCEAN", "PLANT", "QUIET", "RIVER", "STONE", "TRAIN",
    "UNION", "VIVID", "WHALE", "YOUTH", "ZEBRA",
];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse - lattice structure", |b| {
        b.iter(|| black_box(parse_structure(black_box(LATTICE_STRUCTURE)).unwrap()));
    });

    c.bench_function("parse - word list", |b| {
        b.iter(|| black_box(WordList::new(black_box(LATTICE_WORDS).iter().copied())));
    });
}

fn bench_propagation(c: &mut Criterion) {
    let grid = parse_structure(LATTICE_STRUCTURE).unwrap();
    let words = WordList::new(LATTICE_WORDS.iter().copied());
    let problem = CrosswordProblem::new(&grid, &words);
    let seeded = problem.initial_domains();

    c.bench_function("ac3 - lattice", |b| {
        b.iter(|| {
            let mut domains = seeded.clone();
            black_box(enforce_arc_consistency(&problem, &mut domains, None));
        });
    });
}

fn bench_solve(c: &mut Criterion) {
    let ring_grid = parse_structure(RING_STRUCTURE).unwrap();
    let ring_words = WordList::new(RING_WORDS.iter().copied());

    c.bench_function("solve - ring", |b| {
        b.iter(|| {
            let mut solver = CrosswordSolver::new(&ring_grid, &ring_words);
            black_box(solver.solve());
        });
    });

    let lattice_grid = parse_structure(LATTICE_STRUCTURE).unwrap();
    let lattice_words = WordList::new(LATTICE_WORDS.iter().copied());

    c.bench_function("solve - lattice", |b| {
        b.iter(|| {
            let mut solver = CrosswordSolver::new(&lattice_grid, &lattice_words);
            black_box(solver.solve());
        });
    });
}

criterion_group!(benches, bench_parse, bench_propagation, bench_solve);

criterion_main!(benches);
