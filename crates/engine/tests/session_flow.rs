//! End-to-end session: create a player and character, take a contract,
//! breach the target system, loot it, and collect the reward.

use std::sync::Arc;

use decker_engine::use_cases::{CreateCharacterInput, ProgramOrder, RunProgress};
use decker_engine::{App, BufferingEventSink, SystemClock};
use decker_domain::{
    Contract, Credits, Ice, IceType, IntrusionTuning, Node, ProgramType, RandomSource, Source,
    System,
};

/// Deterministic random source so the detection roll never fires.
struct AlwaysHigh;

impl RandomSource for AlwaysHigh {
    fn gen_range(&self, _low: i32, high: i32) -> i32 {
        high
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn contract_run_pays_out() {
    init_tracing();

    let sink = Arc::new(BufferingEventSink::new());
    let app = App::wired(
        sink.clone(),
        Arc::new(SystemClock::new()),
        Arc::new(AlwaysHigh),
        IntrusionTuning::default(),
    );

    // Session setup
    let _player_id = app.use_cases.player.create_player("Otto").await.unwrap();
    let character_id = app
        .use_cases
        .character
        .create_character(CreateCharacterInput {
            name: "Case".into(),
            skills: vec![("hacking".into(), 4)],
            starting_credits: 1000,
            memory_capacity: 50,
            skill_points: 0,
        })
        .await
        .unwrap();

    // Gear up: +2 attack brings the character to 6 against strength-5 ICE
    app.use_cases
        .character
        .purchase_program(
            character_id,
            ProgramOrder {
                name: "IcePick v1".into(),
                kind: ProgramType::Attack,
                size: 10,
                cost: 500,
                rating: 2,
                description: "A basic intrusion program.".into(),
            },
        )
        .await
        .unwrap();

    // Seed the target system
    let node = Node::new("R&D data store")
        .unwrap()
        .with_ice(Ice::new("Sentry", IceType::White, 5).unwrap())
        .with_source(Source::new("formula file", 300).unwrap());
    let system = System::new("Saeder-Krupp HQ").unwrap().with_node(node.id());
    app.repositories.nodes.save(&node).await.unwrap();
    app.repositories.systems.save(&system).await.unwrap();

    let contract = Contract::new("Steal the formula", "Mr. Johnson", system.id(), 5000)
        .unwrap()
        .with_objective("Breach the R&D data store");
    app.repositories.contracts.save(&contract).await.unwrap();

    // Take the job
    let available = app.use_cases.contract.available_contracts().await.unwrap();
    assert_eq!(available.len(), 1);
    app.use_cases
        .contract
        .accept_contract(contract.id(), character_id)
        .await
        .unwrap();

    // Run the matrix
    let run_id = app
        .use_cases
        .intrusion
        .start_run(character_id, system.id(), "hacking")
        .await
        .unwrap();
    assert!(matches!(
        app.use_cases.intrusion.advance_run(run_id).await.unwrap(),
        RunProgress::Engaged { .. }
    ));
    assert_eq!(
        app.use_cases.intrusion.advance_run(run_id).await.unwrap(),
        RunProgress::NodeBreached
    );

    let loot = app.use_cases.intrusion.loot_node(run_id).await.unwrap();
    assert_eq!(loot.total, 300);

    // Collect the reward
    app.use_cases
        .contract
        .complete_contract(contract.id())
        .await
        .unwrap();

    let sheet = app
        .use_cases
        .character
        .character_sheet(character_id)
        .await
        .unwrap();
    // 1000 start - 500 program + 300 loot + 5000 reward
    assert_eq!(sheet.credits, 5800);

    assert_eq!(
        sink.event_types(),
        vec![
            "player_created",
            "character_created",
            "program_purchased",
            "contract_accepted",
            "ice_defeated",
            "node_breached",
            "source_looted",
            "contract_completed",
        ]
    );
}

#[tokio::test]
async fn default_wiring_runs_a_session() {
    init_tracing();

    let app = App::in_memory(IntrusionTuning::default());
    let player_id = app.use_cases.player.create_player("Otto").await.unwrap();
    let status = app.use_cases.player.player_status(player_id).await.unwrap();
    assert_eq!(status.health, 100);
}

#[tokio::test]
async fn loot_is_idempotent_across_runs() {
    init_tracing();

    let sink = Arc::new(BufferingEventSink::new());
    let app = App::wired(
        sink,
        Arc::new(SystemClock::new()),
        Arc::new(AlwaysHigh),
        IntrusionTuning::default(),
    );

    let character_id = app
        .use_cases
        .character
        .create_character(CreateCharacterInput {
            name: "Case".into(),
            skills: vec![("hacking".into(), 6)],
            starting_credits: 0,
            memory_capacity: 50,
            skill_points: 0,
        })
        .await
        .unwrap();

    let node = Node::new("vault")
        .unwrap()
        .with_source(Source::new("paydata", 750).unwrap());
    let system = System::new("Host").unwrap().with_node(node.id());
    app.repositories.nodes.save(&node).await.unwrap();
    app.repositories.systems.save(&system).await.unwrap();

    let run_id = app
        .use_cases
        .intrusion
        .start_run(character_id, system.id(), "hacking")
        .await
        .unwrap();
    // Undefended node breaches on approach
    assert_eq!(
        app.use_cases.intrusion.advance_run(run_id).await.unwrap(),
        RunProgress::NodeBreached
    );

    let first = app.use_cases.intrusion.loot_node(run_id).await.unwrap();
    assert_eq!(first.total, 750);
    let second = app.use_cases.intrusion.loot_node(run_id).await.unwrap();
    assert_eq!(second.total, 0);

    let character = app
        .repositories
        .characters
        .get(character_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(character.credits(), Credits::new(750));
}
