use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use harvest_ledger::MemoryLedger;
use harvest_rewards::{EngineConfig, NullSink, PoolId, RewardsEngine, SingleAdmin};
use harvest_types::{AccountId, Timestamp, TokenId};

/// Engine with one funded pool and `stakers` active positions.
fn engine_with_stakers(stakers: u64) -> (RewardsEngine, MemoryLedger, PoolId) {
    let admin = AccountId::new("admin");
    let policy = SingleAdmin::new(admin.clone());
    let reward_token = TokenId::new("RWD");
    let reward_vault = AccountId::new("reward-vault");
    let config = EngineConfig::new(
        reward_token.clone(),
        AccountId::new("stake-vault"),
        reward_vault.clone(),
    );

    let mut engine = RewardsEngine::new(config);
    let mut ledger = MemoryLedger::new();
    let pool = engine
        .create_pool(&policy, &admin, &mut NullSink, TokenId::new("LP"))
        .unwrap();
    engine
        .set_duration(&policy, &admin, pool, 1_000_000, Timestamp::ZERO)
        .unwrap();
    ledger.mint(&reward_token, &reward_vault, 1_000_000_000);
    engine
        .update_rate(&policy, &admin, &ledger, pool, 1_000_000_000, Timestamp::ZERO)
        .unwrap();

    for i in 0..stakers {
        let account = AccountId::new(format!("staker-{i}"));
        ledger.mint(&TokenId::new("LP"), &account, 1_000);
        engine
            .stake(&mut ledger, &mut NullSink, &account, pool, 1_000, Timestamp::new(i))
            .unwrap();
    }
    (engine, ledger, pool)
}

/// earned() must stay O(1) no matter how many other positions exist.
fn bench_earned(c: &mut Criterion) {
    let mut group = c.benchmark_group("earned");
    for stakers in [1u64, 100, 10_000] {
        let (engine, _ledger, pool) = engine_with_stakers(stakers);
        let account = AccountId::new("staker-0");
        let now = Timestamp::new(stakers + 500_000);

        group.bench_with_input(BenchmarkId::new("positions", stakers), &stakers, |b, _| {
            b.iter(|| black_box(engine.earned(black_box(pool), black_box(&account), now)));
        });
    }
    group.finish();
}

fn bench_stake_withdraw_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("stake_withdraw");
    for stakers in [1u64, 100, 10_000] {
        let (mut engine, mut ledger, pool) = engine_with_stakers(stakers);
        let account = AccountId::new("staker-0");
        let mut now = stakers + 1;

        group.bench_with_input(BenchmarkId::new("positions", stakers), &stakers, |b, _| {
            b.iter(|| {
                now += 1;
                engine
                    .withdraw(
                        &mut ledger,
                        &mut NullSink,
                        &account,
                        pool,
                        500,
                        Timestamp::new(now),
                    )
                    .unwrap();
                engine
                    .stake(
                        &mut ledger,
                        &mut NullSink,
                        &account,
                        pool,
                        500,
                        Timestamp::new(now),
                    )
                    .unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_earned, bench_stake_withdraw_cycle);
criterion_main!(benches);
