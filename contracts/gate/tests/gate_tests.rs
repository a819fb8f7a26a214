//! Enforcement gate driven through the venue: router allow-list, governed
//! trade checks, liquidity cooldown and same-step withdrawal blocking

use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{from_json, Addr, Uint128};
use entropy_intents_gate::msg::{ConfigResponse, ExecuteMsg, QueryMsg};
use entropy_intents_gate::state::POSITION_ACTIVATION;
use entropy_intents_gate::{EnforcementGate, GateError};
use entropy_intents_runtime::{bank, Chain};
use entropy_intents_types::{select_route, Intent, IntentError, RouteId};
use entropy_intents_venue::{
    LiquidityDelta, ModifyLiquidityParams, PositionKey, RouteKey, SwapDelta, SwapParams,
    SwapRouter, Venue, VenueError,
};

type GateResult<T> = Result<T, VenueError<GateError>>;

const ACTIVATION_STEPS: u64 = 3;
const GENESIS: u64 = 1;

struct Env {
    chain: Chain,
    gate: EnforcementGate,
    router: SwapRouter<EnforcementGate>,
    rogue: SwapRouter<EnforcementGate>,
    key: RouteKey,
    alt_key: RouteKey,
    admin: Addr,
    lp: Addr,
    trader: Addr,
}

fn setup() -> Env {
    let api = MockApi::default();
    let gate = EnforcementGate::new(api.addr_make("gate"));
    let venue_addr = api.addr_make("venue");
    let router = SwapRouter::new(
        api.addr_make("router"),
        Venue::new(venue_addr.clone(), gate.clone()),
    );
    let rogue = SwapRouter::new(api.addr_make("rogue"), Venue::new(venue_addr, gate.clone()));
    let key = RouteKey::new("uatom", "uusdc", 30, 60, gate.address().clone());
    let alt_key = RouteKey::new("uatom", "uusdc", 5, 10, gate.address().clone());
    let admin = api.addr_make("admin");
    let lp = api.addr_make("lp");
    let trader = api.addr_make("trader");

    let mut chain = Chain::new("gate-test", GENESIS, [9u8; 32]);
    chain
        .transact(&admin, |ctx| -> GateResult<()> {
            gate.instantiate(
                ctx,
                admin.clone(),
                ACTIVATION_STEPS,
                vec![router.address().clone()],
            )
            .map_err(VenueError::Hook)?;
            for who in [&lp, &trader] {
                bank::mint(ctx.storage_mut(), "uatom", who, Uint128::new(10_000_000))?;
                bank::mint(ctx.storage_mut(), "uusdc", who, Uint128::new(10_000_000))?;
            }
            for route in [&key, &alt_key] {
                router.venue().initialize(ctx, route)?;
                router.modify_liquidity(ctx, &lp, route, liquidity(1_000_000), &[])?;
            }
            Ok(())
        })
        .unwrap();

    Env {
        chain,
        gate,
        router,
        rogue,
        key,
        alt_key,
        admin,
        lp,
        trader,
    }
}

fn liquidity(delta: i128) -> ModifyLiquidityParams {
    ModifyLiquidityParams {
        owner: Addr::unchecked("replaced"),
        lower: -600,
        upper: 600,
        liquidity_delta: delta,
        salt: [4u8; 32],
    }
}

fn governed(routes: &[RouteId], start: u64, end: u64) -> Intent {
    Intent::builder()
        .window(start, end)
        .routes(routes.iter().copied())
        .build()
        .unwrap()
}

fn swap(env: &mut Env, key: &RouteKey, payload: &[u8]) -> GateResult<SwapDelta> {
    let (router, trader) = (&env.router, env.trader.clone());
    env.chain.transact(&trader, |ctx| {
        router.swap(
            ctx,
            &trader,
            key,
            SwapParams::exact_input(true, Uint128::new(1_000), Uint128::zero()),
            payload,
        )
    })
}

fn remove(env: &mut Env, key: &RouteKey, shares: i128) -> GateResult<LiquidityDelta> {
    let (router, lp) = (&env.router, env.lp.clone());
    env.chain.transact(&lp, |ctx| {
        router.modify_liquidity(ctx, &lp, key, liquidity(-shares), &[])
    })
}

fn intent_error(err: VenueError<GateError>) -> IntentError {
    match err {
        VenueError::Hook(GateError::Intent(err)) => err,
        other => panic!("expected intent rejection, got {other}"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUTER ALLOW-LIST
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ungoverned_swap_through_listed_router_is_allowed() {
    let mut env = setup();
    let key = env.key.clone();

    let delta = swap(&mut env, &key, &[]).unwrap();
    assert!(!delta.amount_out.is_zero());
    assert_eq!(
        env.gate
            .last_trade_step(env.chain.view().storage, &key.id())
            .unwrap(),
        None
    );
}

#[test]
fn unlisted_router_cannot_trade_or_touch_liquidity() {
    let mut env = setup();
    let (rogue, trader, key) = (&env.rogue, env.trader.clone(), env.key.clone());

    let err = env
        .chain
        .transact(&trader, |ctx| {
            rogue.swap(
                ctx,
                &trader,
                &key,
                SwapParams::exact_input(true, Uint128::new(1_000), Uint128::zero()),
                &[],
            )
        })
        .unwrap_err();
    assert!(matches!(
        err,
        VenueError::Hook(GateError::RouterNotAllowed { .. })
    ));

    let err = env
        .chain
        .transact(&trader, |ctx| {
            rogue.modify_liquidity(ctx, &trader, &key, liquidity(10), &[])
        })
        .unwrap_err();
    assert!(matches!(
        err,
        VenueError::Hook(GateError::RouterNotAllowed { .. })
    ));
    assert_eq!(
        bank::balance(env.chain.view().storage, "uatom", &env.trader).unwrap(),
        Uint128::new(10_000_000)
    );
}

#[test]
fn router_is_checked_before_intent_logic() {
    let mut env = setup();
    let (rogue, trader, key) = (&env.rogue, env.trader.clone(), env.key.clone());

    // payload is garbage, but the router check fires first
    let err = env
        .chain
        .transact(&trader, |ctx| {
            rogue.swap(
                ctx,
                &trader,
                &key,
                SwapParams::exact_input(true, Uint128::new(1_000), Uint128::zero()),
                &[0xde, 0xad],
            )
        })
        .unwrap_err();
    assert!(matches!(
        err,
        VenueError::Hook(GateError::RouterNotAllowed { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// GOVERNED TRADES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn governed_swap_records_last_trade_step() {
    let mut env = setup();
    env.chain.advance_to(12);
    let key = env.key.clone();
    let payload = governed(&[key.id()], 10, 110).encode();

    swap(&mut env, &key, &payload).unwrap();
    assert_eq!(
        env.gate
            .last_trade_step(env.chain.view().storage, &key.id())
            .unwrap(),
        Some(12)
    );

    let event = env.chain.events_of_type("trade_executed").last().unwrap();
    assert_eq!(event.step, 12);
    assert!(event
        .event
        .attributes
        .iter()
        .any(|a| a.key == "governed" && a.value == "true"));
}

#[test]
fn window_not_started_rejects_and_unwinds() {
    let mut env = setup();
    env.chain.advance_to(5);
    let key = env.key.clone();
    let payload = governed(&[key.id()], 10, 110).encode();

    let err = intent_error(swap(&mut env, &key, &payload).unwrap_err());
    assert_eq!(
        err,
        IntentError::ExecutionWindowNotStarted {
            current_step: 5,
            start_step: 10,
        }
    );
    assert_eq!(
        bank::balance(env.chain.view().storage, "uatom", &env.trader).unwrap(),
        Uint128::new(10_000_000)
    );
}

#[test]
fn expired_window_rejects() {
    let mut env = setup();
    env.chain.advance_to(20);
    let key = env.key.clone();
    let payload = governed(&[key.id()], 2, 10).encode();

    let err = intent_error(swap(&mut env, &key, &payload).unwrap_err());
    assert!(matches!(err, IntentError::ExecutionWindowExpired { .. }));
}

#[test]
fn latched_first_attempt_enforces_min_delay() {
    let mut env = setup();
    env.chain.advance_to(20);
    let key = env.key.clone();

    let mut intent = Intent::builder()
        .window(10, 110)
        .min_delay_steps(5)
        .route(key.id())
        .build()
        .unwrap();
    intent.created_at_step = 18;

    let err = intent_error(swap(&mut env, &key, &intent.encode()).unwrap_err());
    assert_eq!(
        err,
        IntentError::MinDelayNotMet {
            current_step: 20,
            created_at_step: 18,
            min_delay_steps: 5,
        }
    );

    env.chain.advance_to(23);
    swap(&mut env, &key, &intent.encode()).unwrap();
}

#[test]
fn only_the_selected_route_is_accepted() {
    let mut env = setup();
    env.chain.advance_to(20);
    let (key, alt_key) = (env.key.clone(), env.alt_key.clone());
    let intent = governed(&[key.id(), alt_key.id()], 10, 110);

    let selected = select_route(&intent, 20, env.chain.view().beacons).unwrap();
    let (chosen, other) = if selected == key.id() {
        (key, alt_key)
    } else {
        (alt_key, key)
    };
    let payload = intent.encode();

    let err = intent_error(swap(&mut env, &other, &payload).unwrap_err());
    assert_eq!(err, IntentError::RouteNotAllowed { route: other.id() });

    swap(&mut env, &chosen, &payload).unwrap();
}

#[test]
fn route_outside_allowed_set_is_rejected() {
    let mut env = setup();
    env.chain.advance_to(12);
    let (key, alt_key) = (env.key.clone(), env.alt_key.clone());
    let payload = governed(&[key.id()], 10, 110).encode();

    let err = intent_error(swap(&mut env, &alt_key, &payload).unwrap_err());
    assert!(matches!(err, IntentError::RouteNotAllowed { .. }));
}

#[test]
fn multi_route_intent_needs_a_finalized_beacon() {
    let mut env = setup();
    let intent = governed(&[env.key.id(), env.alt_key.id()], 0, 10);
    let key = env.key.clone();

    // still at genesis: no step has closed yet
    let err = intent_error(swap(&mut env, &key, &intent.encode()).unwrap_err());
    assert_eq!(
        err,
        IntentError::BeaconUnavailable {
            current_step: GENESIS
        }
    );
}

#[test]
fn malformed_and_invalid_payloads_are_rejected() {
    let mut env = setup();
    env.chain.advance_to(12);
    let key = env.key.clone();

    let err = intent_error(swap(&mut env, &key, &[1, 2, 3]).unwrap_err());
    assert!(matches!(err, IntentError::MalformedPayload { .. }));

    let mut narrow = governed(&[key.id()], 10, 110);
    narrow.end_step = 11;
    let err = intent_error(swap(&mut env, &key, &narrow.encode()).unwrap_err());
    assert!(matches!(err, IntentError::InvalidWindow { .. }));
}

// ═══════════════════════════════════════════════════════════════════════════
// LIQUIDITY PROTECTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn removal_waits_for_activation_delay() {
    let mut env = setup();
    let key = env.key.clone();

    env.chain.advance_to(GENESIS + ACTIVATION_STEPS - 1);
    let err = remove(&mut env, &key, 1_000).unwrap_err();
    assert!(matches!(
        err,
        VenueError::Hook(GateError::LiquidityActivationPending {
            activated_at: GENESIS,
            required: ACTIVATION_STEPS,
            ..
        })
    ));

    env.chain.advance_to(GENESIS + ACTIVATION_STEPS);
    remove(&mut env, &key, 1_000).unwrap();
}

#[test]
fn activation_is_latched_only_once() {
    let mut env = setup();
    env.chain.advance_to(8);
    let (router, lp, key) = (&env.router, env.lp.clone(), env.key.clone());

    env.chain
        .transact(&lp, |ctx| {
            router.modify_liquidity(ctx, &lp, &key, liquidity(500), &[])
        })
        .unwrap();

    let position = PositionKey {
        route: key.id(),
        owner: env.lp.clone(),
        lower: -600,
        upper: 600,
        salt: [4u8; 32],
    };
    assert_eq!(
        env.gate
            .position_activation(env.chain.view().storage, &position)
            .unwrap(),
        Some(GENESIS)
    );
    // topping up does not restart the cooldown
    remove(&mut env, &key, 500).unwrap();
}

#[test]
fn same_step_trade_blocks_removal_regardless_of_cooldown() {
    let mut env = setup();
    env.chain.advance_to(30);
    let key = env.key.clone();
    let payload = governed(&[key.id()], 10, 110).encode();

    swap(&mut env, &key, &payload).unwrap();
    let err = remove(&mut env, &key, 1_000).unwrap_err();
    assert!(matches!(
        err,
        VenueError::Hook(GateError::RemovalBlockedSameStep { step: 30, .. })
    ));

    // other routes are unaffected
    let alt_key = env.alt_key.clone();
    remove(&mut env, &alt_key, 1_000).unwrap();

    env.chain.advance();
    remove(&mut env, &key, 1_000).unwrap();
}

#[test]
fn ungoverned_trade_does_not_block_removal() {
    let mut env = setup();
    env.chain.advance_to(30);
    let key = env.key.clone();

    swap(&mut env, &key, &[]).unwrap();
    remove(&mut env, &key, 1_000).unwrap();
}

#[test]
fn position_unknown_to_gate_may_leave_immediately() {
    let mut env = setup();
    let key = env.key.clone();
    let digest = PositionKey {
        route: key.id(),
        owner: env.lp.clone(),
        lower: -600,
        upper: 600,
        salt: [4u8; 32],
    }
    .digest();

    let admin = env.admin.clone();
    env.chain
        .transact(&admin, |ctx| -> GateResult<()> {
            POSITION_ACTIVATION.remove(ctx.storage_mut(), &digest);
            Ok(())
        })
        .unwrap();

    remove(&mut env, &key, 1_000).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// ADMINISTRATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn admin_operations_require_admin() {
    let mut env = setup();
    let (gate, lp) = (&env.gate, env.lp.clone());

    let err = env
        .chain
        .transact(&lp, |ctx| gate.add_router(ctx, &lp, lp.clone()))
        .unwrap_err();
    assert!(matches!(err, GateError::Unauthorized {}));

    let err = env
        .chain
        .transact(&lp, |ctx| gate.set_liquidity_activation_steps(ctx, &lp, 9))
        .unwrap_err();
    assert!(matches!(err, GateError::Unauthorized {}));

    let err = env
        .chain
        .transact(&lp, |ctx| gate.transfer_admin(ctx, &lp, lp.clone()))
        .unwrap_err();
    assert!(matches!(err, GateError::Unauthorized {}));
}

#[test]
fn router_list_maintenance() {
    let mut env = setup();
    let (gate, admin) = (&env.gate, env.admin.clone());
    let listed = env.router.address().clone();
    let rogue = env.rogue.address().clone();

    let err = env
        .chain
        .transact(&admin, |ctx| gate.add_router(ctx, &admin, listed.clone()))
        .unwrap_err();
    assert!(matches!(err, GateError::RouterAlreadyAllowed { .. }));

    env.chain
        .transact(&admin, |ctx| gate.add_router(ctx, &admin, rogue.clone()))
        .unwrap();
    assert!(gate.is_router_allowed(env.chain.view().storage, &rogue));
    assert_eq!(gate.routers(env.chain.view().storage).unwrap().routers.len(), 2);

    env.chain
        .transact(&admin, |ctx| gate.remove_router(ctx, &admin, rogue.clone()))
        .unwrap();
    assert!(!gate.is_router_allowed(env.chain.view().storage, &rogue));

    let err = env
        .chain
        .transact(&admin, |ctx| gate.remove_router(ctx, &admin, rogue.clone()))
        .unwrap_err();
    assert!(matches!(err, GateError::RouterNotFound { .. }));

    assert_eq!(env.chain.events_of_type("router_added").count(), 1);
    assert_eq!(env.chain.events_of_type("router_removed").count(), 1);
}

#[test]
fn json_admin_messages_dispatch_to_handlers() {
    let mut env = setup();
    let (gate, admin) = (&env.gate, env.admin.clone());
    let rogue = env.rogue.address().clone();

    let add: ExecuteMsg =
        from_json(format!(r#"{{"add_router":{{"router":"{rogue}"}}}}"#)).unwrap();
    env.chain
        .transact(&admin, |ctx| gate.execute(ctx, &admin, add))
        .unwrap();

    let allowed: bool = from_json(
        gate.query(
            env.chain.view().storage,
            QueryMsg::IsRouterAllowed {
                router: rogue.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(allowed);

    let reply = env
        .chain
        .transact(&admin, |ctx| {
            gate.execute(
                ctx,
                &admin,
                ExecuteMsg::SetLiquidityActivationSteps { steps: 0 },
            )
        })
        .unwrap();
    assert_eq!(from_json::<u64>(reply).unwrap(), 1);

    let lp = env.lp.clone();
    let err = env
        .chain
        .transact(&lp, |ctx| {
            gate.execute(
                ctx,
                &lp,
                ExecuteMsg::RemoveRouter {
                    router: rogue.to_string(),
                },
            )
        })
        .unwrap_err();
    assert!(matches!(err, GateError::Unauthorized {}));

    let config: ConfigResponse =
        from_json(gate.query(env.chain.view().storage, QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.admin, admin.to_string());
    assert_eq!(config.liquidity_activation_steps, 1);
}

#[test]
fn zero_activation_delay_is_coerced_to_one() {
    let mut env = setup();
    let (gate, admin) = (&env.gate, env.admin.clone());

    let stored = env
        .chain
        .transact(&admin, |ctx| gate.set_liquidity_activation_steps(ctx, &admin, 0))
        .unwrap();
    assert_eq!(stored, 1);
    assert_eq!(
        gate.config(env.chain.view().storage)
            .unwrap()
            .liquidity_activation_steps,
        1
    );
}

#[test]
fn admin_transfer_hands_over_control() {
    let mut env = setup();
    let (gate, admin, lp) = (&env.gate, env.admin.clone(), env.lp.clone());

    env.chain
        .transact(&admin, |ctx| gate.transfer_admin(ctx, &admin, lp.clone()))
        .unwrap();

    let err = env
        .chain
        .transact(&admin, |ctx| gate.set_liquidity_activation_steps(ctx, &admin, 5))
        .unwrap_err();
    assert!(matches!(err, GateError::Unauthorized {}));

    env.chain
        .transact(&lp, |ctx| gate.set_liquidity_activation_steps(ctx, &lp, 5))
        .unwrap();
    assert_eq!(gate.config(env.chain.view().storage).unwrap().admin, lp.to_string());
}
