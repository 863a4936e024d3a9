use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{coins, from_json, Addr, Uint128};
use cw_multi_test::{App, ContractWrapper, Executor};

use pickaxe_fhe::msg::{AclResponse, QueryMsg as FheQueryMsg};
use pickaxe_fhe::Handle;
use pickaxe_fhe_executor::state::{Ciphertext, CIPHERTEXTS};
use pickaxe_mining_engine::contract::{
    execute, instantiate, query, reply, MAX_LUCK_WEIGHT, MAX_REWARD_BASE,
};
use pickaxe_mining_engine::error::ContractError;
use pickaxe_mining_engine::msg::*;
use pickaxe_mining_engine::state::{Config, ProbabilityEntry};

const DENOM: &str = "ustake";
const L1_PRICE: u128 = 10_000;

/// Failures are carried as their rendered error chain.
type TxResult = Result<(), String>;

struct Suite {
    app: App,
    owner: Addr,
    player: Addr,
    stranger: Addr,
    executor: Addr,
    nft: Addr,
    gold: Addr,
    treasure: Addr,
    engine: Addr,
}

fn setup() -> Suite {
    let api = MockApi::default();
    let owner = api.addr_make("owner");
    let player = api.addr_make("player");
    let stranger = api.addr_make("stranger");

    let mut app = App::new(|router, _api, storage| {
        for who in [&player, &stranger] {
            router
                .bank
                .init_balance(storage, who, coins(1_000_000, DENOM))
                .unwrap();
        }
    });

    let executor_code = app.store_code(Box::new(ContractWrapper::new(
        pickaxe_fhe_executor::contract::execute,
        pickaxe_fhe_executor::contract::instantiate,
        pickaxe_fhe_executor::contract::query,
    )));
    let nft_code = app.store_code(Box::new(ContractWrapper::new(
        pickaxe_nft::contract::execute,
        pickaxe_nft::contract::instantiate,
        pickaxe_nft::contract::query,
    )));
    let gold_code = app.store_code(Box::new(ContractWrapper::new(
        pickaxe_gold_token::contract::execute,
        pickaxe_gold_token::contract::instantiate,
        pickaxe_gold_token::contract::query,
    )));
    let treasure_code = app.store_code(Box::new(ContractWrapper::new(
        pickaxe_treasure::contract::execute,
        pickaxe_treasure::contract::instantiate,
        pickaxe_treasure::contract::query,
    )));
    let engine_code = app.store_code(Box::new(
        ContractWrapper::new(execute, instantiate, query).with_reply(reply),
    ));

    let executor = app
        .instantiate_contract(
            executor_code,
            owner.clone(),
            &pickaxe_fhe::msg::InstantiateMsg {
                max_program_len: None,
            },
            &[],
            "fhe-executor",
            None,
        )
        .unwrap();
    let gold = app
        .instantiate_contract(
            gold_code,
            owner.clone(),
            &pickaxe_gold_token::msg::InstantiateMsg {
                owner: owner.to_string(),
                mining_engine: None,
                name: None,
                symbol: None,
                decimals: None,
                max_supply: Uint128::new(1_000_000_000),
            },
            &[],
            "gold",
            None,
        )
        .unwrap();
    let treasure = app
        .instantiate_contract(
            treasure_code,
            owner.clone(),
            &pickaxe_treasure::msg::InstantiateMsg {
                owner: owner.to_string(),
                minters: vec![],
            },
            &[],
            "treasure",
            None,
        )
        .unwrap();
    let nft = app
        .instantiate_contract(
            nft_code,
            owner.clone(),
            &pickaxe_nft::msg::InstantiateMsg {
                owner: owner.to_string(),
                fhe_executor: executor.to_string(),
                denom: DENOM.to_string(),
                mining_engine: None,
                name: None,
                symbol: None,
                level_configs: None,
            },
            &[],
            "pickaxe-nft",
            None,
        )
        .unwrap();
    let engine = app
        .instantiate_contract(
            engine_code,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                pickaxe_nft: nft.to_string(),
                gold_token: gold.to_string(),
                treasure: treasure.to_string(),
                fhe_executor: executor.to_string(),
                probabilities: None,
            },
            &[],
            "mining-engine",
            None,
        )
        .unwrap();

    app.execute_contract(
        owner.clone(),
        gold.clone(),
        &pickaxe_gold_token::msg::ExecuteMsg::SetMiningEngine {
            engine: engine.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        owner.clone(),
        treasure.clone(),
        &pickaxe_treasure::msg::ExecuteMsg::AddMinter {
            minter: engine.to_string(),
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        owner.clone(),
        nft.clone(),
        &pickaxe_nft::msg::ExecuteMsg::SetMiningEngine {
            engine: engine.to_string(),
        },
        &[],
    )
    .unwrap();

    Suite {
        app,
        owner,
        player,
        stranger,
        executor,
        nft,
        gold,
        treasure,
        engine,
    }
}

/// The error chain of a failed transaction mentions `expected`.
fn assert_fails_with<E: std::fmt::Debug>(err: E, expected: ContractError) {
    let chain = format!("{:?}", err);
    assert!(
        chain.contains(&expected.to_string()),
        "expected `{}` in {}",
        expected,
        chain
    );
}

impl Suite {
    fn mint_pickaxe(&mut self, who: &Addr, level: u8, paid: u128) -> u64 {
        self.app
            .execute_contract(
                who.clone(),
                self.nft.clone(),
                &pickaxe_nft::msg::ExecuteMsg::Mint { level },
                &coins(paid, DENOM),
            )
            .unwrap();
        let res: pickaxe_nft::msg::NumTokensResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.nft, &pickaxe_nft::msg::QueryMsg::NumTokens {})
            .unwrap();
        res.count
    }

    fn mine(&mut self, who: &Addr, token_id: u64) -> TxResult {
        self.app
            .execute_contract(
                who.clone(),
                self.engine.clone(),
                &ExecuteMsg::Mine { token_id },
                &[],
            )
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }

    fn claim_rewards(&mut self, who: &Addr, amount: u128) -> TxResult {
        self.app
            .execute_contract(
                who.clone(),
                self.engine.clone(),
                &ExecuteMsg::ClaimRewards {
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }

    fn attributes(&self, token_id: u64) -> pickaxe_nft::msg::AttributesResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.nft,
                &pickaxe_nft::msg::QueryMsg::Attributes { token_id },
            )
            .unwrap()
    }

    fn luck_handle(&self, token_id: u64) -> Handle {
        let res: pickaxe_nft::msg::LuckResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.nft, &pickaxe_nft::msg::QueryMsg::Luck { token_id })
            .unwrap();
        res.handle
    }

    fn earnings_handle(&self, who: &Addr) -> Option<Handle> {
        let res: EncryptedValueResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.engine,
                &QueryMsg::PlayerEarnings {
                    player: who.to_string(),
                },
            )
            .unwrap();
        res.handle
    }

    fn epic_drops_handle(&self, who: &Addr) -> Option<Handle> {
        let res: EncryptedValueResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.engine,
                &QueryMsg::PlayerEpicDrops {
                    player: who.to_string(),
                },
            )
            .unwrap();
        res.handle
    }

    fn stats(&self, who: &Addr) -> PlayerStatsResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.engine,
                &QueryMsg::PlayerStats {
                    player: who.to_string(),
                },
            )
            .unwrap()
    }

    /// Test-harness view of the simulated coprocessor's plaintext.
    fn plaintext(&self, handle: &Handle) -> u64 {
        let raw = self
            .app
            .wrap()
            .query_wasm_raw(
                self.executor.to_string(),
                CIPHERTEXTS.key(handle.as_slice()).to_vec(),
            )
            .unwrap()
            .expect("ciphertext exists");
        from_json::<Ciphertext>(&raw).unwrap().value
    }

    fn earnings(&self, who: &Addr) -> u64 {
        self.earnings_handle(who)
            .map(|h| self.plaintext(&h))
            .unwrap_or(0)
    }

    fn is_allowed(&self, handle: &Handle, who: &Addr) -> bool {
        let res: AclResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.executor,
                &FheQueryMsg::IsAllowed {
                    handle: handle.clone(),
                    account: who.to_string(),
                },
            )
            .unwrap();
        res.allowed
    }

    fn gold_balance(&self, who: &Addr) -> u128 {
        let res: pickaxe_gold_token::msg::BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.gold,
                &pickaxe_gold_token::msg::QueryMsg::Balance {
                    address: who.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    fn gold_supply(&self) -> u128 {
        let res: pickaxe_gold_token::msg::TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.gold, &pickaxe_gold_token::msg::QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply.u128()
    }

    fn set_probability(&mut self, level: u8, epic: u8, rare: u8, common: u8) -> TxResult {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.engine.clone(),
                &ExecuteMsg::UpdateProbability {
                    level,
                    epic_rate: epic,
                    rare_rate: rare,
                    common_rate: common,
                },
                &[],
            )
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }
}

// ─── Mining ─────────────────────────────────────────────────────────────────

#[test]
fn test_ten_mines_then_durability_runs_out() {
    let mut s = setup();
    let player = s.player.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    assert_eq!(s.attributes(id).durability, 100);

    for n in 1..=10u32 {
        s.mine(&player, id).unwrap();
        assert_eq!(s.attributes(id).durability, 100 - 10 * n);
    }
    let err = s.mine(&player, id).unwrap_err();
    assert_fails_with(
        err,
        ContractError::InsufficientDurability {
            available: 0,
            required: 10,
        },
    );
    assert_eq!(s.stats(&player).mining_count, 10);
    assert_eq!(s.attributes(id).durability, 0);
}

#[test]
fn test_mine_requires_ownership() {
    let mut s = setup();
    let player = s.player.clone();
    let stranger = s.stranger.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);

    let err = s.mine(&stranger, id).unwrap_err();
    assert_fails_with(err, ContractError::NotOwner { token_id: id });
    assert_eq!(s.attributes(id).durability, 100);
    assert_eq!(s.stats(&stranger).mining_count, 0);
}

#[test]
fn test_end_to_end_mint_mine_claim() {
    let mut s = setup();
    let player = s.player.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);

    for _ in 0..5 {
        s.mine(&player, id).unwrap();
    }
    let stats = s.stats(&player);
    assert_eq!(stats.mining_count, 5);
    assert!(stats.last_mining_time.is_some());
    assert_eq!(s.attributes(id).durability, 50);

    let before = s.earnings(&player);
    let handle_before = s.earnings_handle(&player);
    let result = s.claim_rewards(&player, 100);

    if before >= 100 {
        result.unwrap();
        assert_eq!(s.gold_balance(&player), 100);
        assert_eq!(s.gold_supply(), 100);
        assert_eq!(s.earnings(&player), before - 100);
        assert_ne!(s.earnings_handle(&player), handle_before);
    } else {
        assert_fails_with(result.unwrap_err(), ContractError::InsufficientBalance);
        assert_eq!(s.gold_balance(&player), 0);
        assert_eq!(s.earnings(&player), before);
        assert_eq!(s.earnings_handle(&player), handle_before);
    }
}

#[test]
fn test_epic_roll_reward_matches_formula() {
    let mut s = setup();
    let player = s.player.clone();
    s.set_probability(1, 100, 0, 0).unwrap();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);

    s.mine(&player, id).unwrap();

    let efficiency = s.attributes(id).efficiency as u64;
    let luck = s.plaintext(&s.luck_handle(id));
    assert!((5..=15).contains(&luck));
    assert!((10..=15).contains(&efficiency));
    // Default epic base 250, luck weight 1
    assert_eq!(s.earnings(&player), 250 * (100 + efficiency) / 100 + luck);
    assert_eq!(s.plaintext(&s.epic_drops_handle(&player).unwrap()), 1);
}

#[test]
fn test_common_roll_never_counts_epic() {
    let mut s = setup();
    let player = s.player.clone();
    s.set_probability(1, 0, 0, 100).unwrap();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);

    for _ in 0..3 {
        s.mine(&player, id).unwrap();
    }
    let efficiency = s.attributes(id).efficiency as u64;
    let luck = s.plaintext(&s.luck_handle(id));
    assert_eq!(s.earnings(&player), 3 * (10 * (100 + efficiency) / 100 + luck));
    assert_eq!(s.plaintext(&s.epic_drops_handle(&player).unwrap()), 0);
}

#[test]
fn test_paused_blocks_mining_not_claims() {
    let mut s = setup();
    let owner = s.owner.clone();
    let player = s.player.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();

    let err = s
        .app
        .execute_contract(
            player.clone(),
            s.engine.clone(),
            &ExecuteMsg::SetPaused { paused: true },
            &[],
        )
        .unwrap_err();
    assert_fails_with(
        err,
        ContractError::Unauthorized {
            role: "owner".to_string(),
        },
    );

    s.app
        .execute_contract(
            owner.clone(),
            s.engine.clone(),
            &ExecuteMsg::SetPaused { paused: true },
            &[],
        )
        .unwrap();
    assert_fails_with(s.mine(&player, id).unwrap_err(), ContractError::MiningPaused);
    assert_eq!(s.attributes(id).durability, 90);

    let earned = s.earnings(&player);
    s.claim_rewards(&player, earned as u128).unwrap();
    assert_eq!(s.gold_balance(&player), earned as u128);

    s.app
        .execute_contract(
            owner,
            s.engine.clone(),
            &ExecuteMsg::SetPaused { paused: false },
            &[],
        )
        .unwrap();
    s.mine(&player, id).unwrap();
}

// ─── Claims ─────────────────────────────────────────────────────────────────

#[test]
fn test_claim_zero_is_noop() {
    let mut s = setup();
    let player = s.player.clone();

    // No player record yet
    s.claim_rewards(&player, 0).unwrap();
    assert_eq!(s.stats(&player).mining_count, 0);
    assert!(s.earnings_handle(&player).is_none());
    assert_eq!(s.gold_supply(), 0);

    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();
    let handle = s.earnings_handle(&player);
    s.claim_rewards(&player, 0).unwrap();
    assert_eq!(s.earnings_handle(&player), handle);
    assert_eq!(s.gold_supply(), 0);
}

#[test]
fn test_over_claim_reverts_everything() {
    let mut s = setup();
    let player = s.player.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();
    s.mine(&player, id).unwrap();

    let earned = s.earnings(&player);
    let handle = s.earnings_handle(&player);

    let err = s.claim_rewards(&player, earned as u128 + 1).unwrap_err();
    assert_fails_with(err, ContractError::InsufficientBalance);
    assert_eq!(s.gold_balance(&player), 0);
    assert_eq!(s.gold_supply(), 0);
    assert_eq!(s.earnings_handle(&player), handle);
    assert_eq!(s.earnings(&player), earned);

    // Exactly the balance is fine and leaves zero behind
    s.claim_rewards(&player, earned as u128).unwrap();
    assert_eq!(s.gold_balance(&player), earned as u128);
    assert_eq!(s.earnings(&player), 0);

    let err = s.claim_rewards(&player, 1).unwrap_err();
    assert_fails_with(err, ContractError::InsufficientBalance);
}

#[test]
fn test_claim_without_history() {
    let mut s = setup();
    let stranger = s.stranger.clone();
    let err = s.claim_rewards(&stranger, 1).unwrap_err();
    assert_fails_with(err, ContractError::InsufficientBalance);

    let err = s
        .app
        .execute_contract(
            stranger,
            s.engine.clone(),
            &ExecuteMsg::ClaimTreasure {
                count: Uint128::new(1),
            },
            &[],
        )
        .unwrap_err();
    assert_fails_with(err, ContractError::InsufficientBalance);
}

#[test]
fn test_claim_treasure_mints_epic_chests() {
    let mut s = setup();
    let player = s.player.clone();
    s.set_probability(1, 100, 0, 0).unwrap();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();
    s.mine(&player, id).unwrap();

    let res = s
        .app
        .execute_contract(
            player.clone(),
            s.engine.clone(),
            &ExecuteMsg::ClaimTreasure {
                count: Uint128::new(2),
            },
            &[],
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-treasure_dropped"));

    let items: pickaxe_treasure::msg::PlayerItemsResponse = s
        .app
        .wrap()
        .query_wasm_smart(
            &s.treasure,
            &pickaxe_treasure::msg::QueryMsg::PlayerItems {
                address: player.to_string(),
            },
        )
        .unwrap();
    assert_eq!(items.balances[3], Uint128::new(2));
    assert_eq!(s.plaintext(&s.epic_drops_handle(&player).unwrap()), 0);

    let err = s
        .app
        .execute_contract(
            player.clone(),
            s.engine.clone(),
            &ExecuteMsg::ClaimTreasure {
                count: Uint128::new(1),
            },
            &[],
        )
        .unwrap_err();
    assert_fails_with(err, ContractError::InsufficientBalance);
}

// ─── Access control on encrypted state ──────────────────────────────────────

#[test]
fn test_only_owner_and_engine_see_encrypted_state() {
    let mut s = setup();
    let player = s.player.clone();
    let stranger = s.stranger.clone();
    let engine = s.engine.clone();
    let id = s.mint_pickaxe(&player, 2, 30_000);
    s.mine(&player, id).unwrap();

    let luck = s.luck_handle(id);
    assert!(s.is_allowed(&luck, &player));
    assert!(s.is_allowed(&luck, &engine));
    assert!(!s.is_allowed(&luck, &stranger));

    let earnings = s.earnings_handle(&player).unwrap();
    assert!(s.is_allowed(&earnings, &player));
    assert!(!s.is_allowed(&earnings, &stranger));

    // A stranger cannot feed the player's earnings into their own program
    let err = s
        .app
        .execute_contract(
            stranger,
            s.executor.clone(),
            &pickaxe_fhe::msg::ExecuteMsg::Evaluate {
                ops: vec![pickaxe_fhe::FheOp::Add {
                    lhs: earnings.clone().into(),
                    rhs: 0u64.into(),
                    out: 0,
                }],
            },
            &[],
        )
        .unwrap_err();
    assert!(format!("{:?}", err).contains("access denied"));
}

#[test]
fn test_transferred_pickaxe_mines_for_new_owner() {
    let mut s = setup();
    let player = s.player.clone();
    let stranger = s.stranger.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);

    s.app
        .execute_contract(
            player.clone(),
            s.nft.clone(),
            &pickaxe_nft::msg::ExecuteMsg::TransferNft {
                recipient: stranger.to_string(),
                token_id: id,
            },
            &[],
        )
        .unwrap();
    assert!(s.is_allowed(&s.luck_handle(id), &stranger));

    assert_fails_with(
        s.mine(&player, id).unwrap_err(),
        ContractError::NotOwner { token_id: id },
    );
    s.mine(&stranger, id).unwrap();
    assert_eq!(s.stats(&stranger).mining_count, 1);
}

// ─── Catalogs & admin ───────────────────────────────────────────────────────

#[test]
fn test_probability_update_validation() {
    let mut s = setup();
    let before: ProbabilityEntry = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Probability { level: 1 })
        .unwrap();
    assert_eq!(
        before,
        ProbabilityEntry {
            epic_rate: 1,
            rare_rate: 14,
            common_rate: 85
        }
    );

    assert_fails_with(
        s.set_probability(1, 10, 10, 79).unwrap_err(),
        ContractError::RateSumInvalid { sum: 99 },
    );
    assert_fails_with(
        s.set_probability(6, 10, 10, 80).unwrap_err(),
        ContractError::InvalidLevel { level: 6 },
    );
    let after: ProbabilityEntry = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Probability { level: 1 })
        .unwrap();
    assert_eq!(after, before);

    s.set_probability(1, 10, 30, 60).unwrap();
    let updated: ProbabilityEntry = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Probability { level: 1 })
        .unwrap();
    assert_eq!(updated.sum(), 100);
    assert_eq!(updated.epic_rate, 10);
}

#[test]
fn test_repair_spends_claimed_gold() {
    let mut s = setup();
    let owner = s.owner.clone();
    let player = s.player.clone();
    s.set_probability(1, 100, 0, 0).unwrap();
    s.app
        .execute_contract(
            owner.clone(),
            s.gold.clone(),
            &pickaxe_gold_token::msg::ExecuteMsg::AddBurner {
                burner: s.nft.to_string(),
            },
            &[],
        )
        .unwrap();
    s.app
        .execute_contract(
            owner,
            s.nft.clone(),
            &pickaxe_nft::msg::ExecuteMsg::SetRepairCost {
                gold_token: Some(s.gold.to_string()),
                cost_per_point: Uint128::new(2),
            },
            &[],
        )
        .unwrap();

    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();
    s.claim_rewards(&player, 100).unwrap();

    s.app
        .execute_contract(
            player.clone(),
            s.nft.clone(),
            &pickaxe_nft::msg::ExecuteMsg::Repair {
                token_id: id,
                amount: 10,
            },
            &[],
        )
        .unwrap();
    assert_eq!(s.attributes(id).durability, 100);
    assert_eq!(s.gold_balance(&player), 80);
    assert_eq!(s.gold_supply(), 80);
}

fn update_mining_config(s: &mut Suite, sender: &Addr, msg: ExecuteMsg) -> TxResult {
    s.app
        .execute_contract(sender.clone(), s.engine.clone(), &msg, &[])
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

fn mining_config(
    durability_per_mine: Option<u32>,
    rewards: Option<(u64, u64, u64)>,
    luck_weight: Option<u64>,
) -> ExecuteMsg {
    ExecuteMsg::UpdateMiningConfig {
        durability_per_mine,
        reward_common: rewards.map(|r| r.0),
        reward_rare: rewards.map(|r| r.1),
        reward_epic: rewards.map(|r| r.2),
        luck_weight,
    }
}

#[test]
fn test_mining_config_validation() {
    let mut s = setup();
    let owner = s.owner.clone();
    let stranger = s.stranger.clone();
    let before: Config = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Config {})
        .unwrap();

    let rejected = [
        (mining_config(Some(0), None, None), "durability_per_mine must be positive"),
        (mining_config(None, Some((0, 50, 250)), None), "reward_common must be positive"),
        (
            mining_config(None, Some((300, 50, 250)), None),
            "rewards must satisfy common <= rare <= epic",
        ),
        (
            mining_config(None, Some((10, 300, 250)), None),
            "rewards must satisfy common <= rare <= epic",
        ),
        (
            mining_config(None, Some((10, 50, MAX_REWARD_BASE + 1)), None),
            "reward_epic too large",
        ),
        (mining_config(None, None, Some(MAX_LUCK_WEIGHT + 1)), "luck_weight too large"),
    ];
    for (msg, reason) in rejected {
        let err = update_mining_config(&mut s, &owner, msg).unwrap_err();
        assert_fails_with(
            err,
            ContractError::InvalidConfig {
                reason: reason.to_string(),
            },
        );
    }
    // Raising only epic below rare is caught against the stored tiers
    let err = update_mining_config(
        &mut s,
        &owner,
        ExecuteMsg::UpdateMiningConfig {
            durability_per_mine: None,
            reward_common: None,
            reward_rare: None,
            reward_epic: Some(40),
            luck_weight: None,
        },
    )
    .unwrap_err();
    assert_fails_with(
        err,
        ContractError::InvalidConfig {
            reason: "rewards must satisfy common <= rare <= epic".to_string(),
        },
    );

    let err =
        update_mining_config(&mut s, &stranger, mining_config(Some(5), None, None)).unwrap_err();
    assert_fails_with(
        err,
        ContractError::Unauthorized {
            role: "owner".to_string(),
        },
    );

    let after: Config = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(after, before);

    // Equal tiers and the largest bases are accepted, and mining still works
    update_mining_config(
        &mut s,
        &owner,
        mining_config(
            Some(5),
            Some((MAX_REWARD_BASE, MAX_REWARD_BASE, MAX_REWARD_BASE)),
            Some(MAX_LUCK_WEIGHT),
        ),
    )
    .unwrap();
    let config: Config = s
        .app
        .wrap()
        .query_wasm_smart(&s.engine, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.durability_per_mine, 5);
    assert_eq!(config.reward_epic, MAX_REWARD_BASE);
    assert_eq!(config.luck_weight, MAX_LUCK_WEIGHT);

    let player = s.player.clone();
    let id = s.mint_pickaxe(&player, 1, L1_PRICE);
    s.mine(&player, id).unwrap();
    assert_eq!(s.attributes(id).durability, 95);
}
