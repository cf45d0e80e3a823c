//! End-to-end tip generation over the full pipeline: raw tables ->
//! pattern bundle -> ranked tips -> report.

use chrono::NaiveDate;
use taxlens_core::models::{ClusteringOutcome, TaxFiling, TipType, Transaction, User};
use taxlens_patterns::PatternMiner;
use taxlens_tips::TipEngine;

fn tx(user: &str, category: &str, amount: f64, month: u32, vendor: &str) -> Transaction {
    Transaction {
        user_id: user.to_string(),
        category: category.to_string(),
        amount,
        vendor: vendor.to_string(),
        transaction_date: NaiveDate::from_ymd_opt(2024, month, 12).unwrap(),
    }
}

fn user(id: &str, occupation: &str) -> User {
    User {
        user_id: id.to_string(),
        occupation_category: occupation.to_string(),
        region: "Berlin".to_string(),
        age_range: "30-39".to_string(),
        family_status: "single".to_string(),
    }
}

fn filing(id: &str, income: f64, deductions: f64) -> TaxFiling {
    TaxFiling {
        user_id: id.to_string(),
        total_income: income,
        total_deductions: deductions,
        refund_amount: 0.0,
    }
}

fn fixture() -> (Vec<Transaction>, Vec<User>, Vec<TaxFiling>) {
    let transactions = vec![
        // u1: heavy deductible spend, December giving, irregular medical.
        tx("u1", "Work Equipment", 1200.0, 2, "Hardware Store"),
        tx("u1", "Charitable Donations", 600.0, 12, "Food Bank"),
        tx("u1", "Medical", 80.0, 1, "Pharmacy"),
        tx("u1", "Medical", 900.0, 10, "Clinic"),
        // u2 and u3: peers for clustering and occupation baselines.
        tx("u2", "Professional Development", 2500.0, 5, "Academy"),
        tx("u2", "Work Equipment", 300.0, 6, "Hardware Store"),
        tx("u3", "Professional Development", 2000.0, 4, "Academy"),
        tx("u3", "Transportation", 800.0, 9, "Rail"),
        tx("u4", "Groceries", 250.0, 7, "Supermarket"),
    ];
    let users = vec![
        user("u1", "Engineer"),
        user("u2", "Engineer"),
        user("u3", "Engineer"),
        user("u4", "Teacher"),
    ];
    let filings = vec![
        filing("u1", 50000.0, 0.0),
        filing("u2", 70000.0, 3000.0),
        filing("u3", 45000.0, 1500.0),
        filing("u4", 30000.0, 200.0),
    ];
    (transactions, users, filings)
}

#[test]
fn tips_are_capped_sorted_and_deterministically_identified() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let tips = engine.generate_for_user("u1", &transactions, &users, &filings, &patterns);
    assert!(!tips.is_empty());
    assert!(tips.len() <= 10);
    for pair in tips.windows(2) {
        assert!(pair[0].impact() >= pair[1].impact());
    }
    for (i, tip) in tips.iter().enumerate() {
        assert_eq!(tip.tip_id, format!("TIP_u1_{:03}", i + 1));
        assert!(tip.confidence >= 0.0 && tip.confidence <= 1.0);
        assert!(tip.potential_savings >= 0.0);
    }
}

#[test]
fn work_equipment_scenario_produces_pinned_savings() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let tips = engine.generate_for_user("u1", &transactions, &users, &filings, &patterns);
    let equipment = tips
        .iter()
        .find(|t| t.tip_type == TipType::DeductionOpportunity && t.category == "Work Equipment")
        .expect("work equipment deduction tip");
    // 1200 * 0.5 capped at 800 -> 600 missed, 0.37 bracket at 50000.
    assert!((equipment.potential_savings - 222.0).abs() < 1e-9);
    assert_eq!(equipment.confidence, 0.8);
}

#[test]
fn timing_tips_fire_for_december_and_irregular_medical() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let tips = engine.generate_for_user("u1", &transactions, &users, &filings, &patterns);
    let timing: Vec<_> = tips
        .iter()
        .filter(|t| t.tip_type == TipType::TimingOptimization)
        .collect();
    let categories: Vec<&str> = timing.iter().map(|t| t.category.as_str()).collect();
    assert!(categories.contains(&"Charitable Donations"));
    assert!(categories.contains(&"Medical"));
}

#[test]
fn quarterly_planning_fires_only_for_high_earners() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let u2_tips = engine.generate_for_user("u2", &transactions, &users, &filings, &patterns);
    assert!(u2_tips.iter().any(|t| t.tip_type == TipType::TaxPlanning));

    let u3_tips = engine.generate_for_user("u3", &transactions, &users, &filings, &patterns);
    assert!(!u3_tips.iter().any(|t| t.tip_type == TipType::TaxPlanning));
}

#[test]
fn peer_learning_requires_cluster_data() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let mut patterns =
        PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());
    // Force the no-clustering path regardless of what the data produced.
    patterns.clustering_patterns = ClusteringOutcome::insufficient();

    for id in ["u1", "u2", "u3"] {
        let tips = engine.generate_for_user(id, &transactions, &users, &filings, &patterns);
        assert!(
            !tips.iter().any(|t| t.tip_type == TipType::PeerLearning),
            "peer tip for {id} without cluster data"
        );
    }
}

#[test]
fn report_summarizes_ranked_tips() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let tips = engine.generate_for_user("u1", &transactions, &users, &filings, &patterns);
    let report = engine.generate_report("u1", &tips);
    assert_eq!(report.total_tips, tips.len());
    let expected: f64 = tips.iter().map(|t| t.potential_savings).sum();
    assert!((report.total_potential_savings - expected).abs() < 1e-9);
    assert!(report.top_recommendations.len() <= 3);
    let grouped: usize = report.tips_by_type.values().map(|v| v.len()).sum();
    assert_eq!(grouped, tips.len());

    // Empty case keeps the fixed wording and zero totals.
    let empty = engine.generate_report("u4_no_tips", &[]);
    assert_eq!(empty.total_tips, 0);
    assert_eq!(empty.total_potential_savings, 0.0);
    assert_eq!(
        empty.summary,
        "No optimization opportunities identified at this time."
    );
}

#[test]
fn parallel_generation_matches_sequential() {
    let engine = TipEngine::standard().unwrap();
    let (transactions, users, filings) = fixture();
    let patterns = PatternMiner::mine(&transactions, &users, &filings, &[], &[], engine.rules());

    let all = engine.generate_for_all(&transactions, &users, &filings, &patterns);
    assert_eq!(all.len(), users.len());
    for user in &users {
        let sequential =
            engine.generate_for_user(&user.user_id, &transactions, &users, &filings, &patterns);
        let parallel = &all[&user.user_id];
        assert_eq!(parallel.len(), sequential.len());
        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.tip_id, b.tip_id);
            assert_eq!(a.potential_savings, b.potential_savings);
        }
    }
}
