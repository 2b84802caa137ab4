use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mcdc_check::bool_expr::BoolExpr;
use mcdc_check::config::AnalysisConfig;
use mcdc_check::tree_checker::check_decision;

fn chained_and(names: &[&str]) -> BoolExpr {
    let mut vars = names.iter();
    let mut expr = BoolExpr::var(*vars.next().unwrap());
    for name in vars {
        expr = BoolExpr::and(expr, BoolExpr::var(*name));
    }
    expr
}

fn shared_subexpression(names: &[&str]) -> BoolExpr {
    // a && x1 || a && x2 || ... : forces node sharing under every order,
    // so every permutation in the reorder search still has to be tried.
    let shared = names[0];
    let mut rest = names[1..].iter();
    let mut expr = BoolExpr::and(BoolExpr::var(shared), BoolExpr::var(*rest.next().unwrap()));
    for name in rest {
        expr = BoolExpr::or(expr, BoolExpr::and(BoolExpr::var(shared), BoolExpr::var(*name)));
    }
    expr
}

fn bdd_construction_benchmark(c: &mut Criterion) {
    let names = ["a", "b", "c", "d", "e"];
    let order: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    let expr = chained_and(&names);
    let config = AnalysisConfig::default();

    c.bench_function("tree-shaped decision classification", |b| {
        b.iter(|| check_decision(black_box(&expr), black_box(&order), black_box(&config)))
    });
}

fn reorder_search_benchmark(c: &mut Criterion) {
    let names = ["a", "b", "c", "d", "e"];
    let order: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    let expr = shared_subexpression(&names);
    let config = AnalysisConfig::default();

    c.bench_function("non-tree decision reorder search (arity 5)", |b| {
        b.iter(|| check_decision(black_box(&expr), black_box(&order), black_box(&config)))
    });
}

criterion_group!(tree_check, bdd_construction_benchmark, reorder_search_benchmark);
criterion_main!(tree_check);
