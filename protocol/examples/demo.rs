//! Terminal walkthrough of a statecoin ledger.
//!
//! Ten identities, balances equal to their index, and three transfers: two
//! that are fine and one that tries to spend money that is not there.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use statecoin_protocol::crypto::KeyPair;
use statecoin_protocol::transaction::{check_transaction, AmountMap, Transaction};
use statecoin_protocol::{State, TransactionBuilder};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================={RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn verdict(state: &State, tx: &Transaction) {
    let start = Instant::now();
    let outcome = check_transaction(state, tx);
    timing("validate", start.elapsed());
    match outcome {
        Ok(()) => println!("{GREEN}  [VALID]{RESET}"),
        Err(reason) => println!("{RED}  [INVALID] {reason}{RESET}"),
    }
}

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn pay(keys: &[KeyPair], from: usize, to: &[(usize, u64)]) -> DemoResult<Transaction> {
    let recipients: AmountMap = to
        .iter()
        .map(|(n, amount)| (keys[*n].identity().clone(), *amount))
        .collect();
    Ok(TransactionBuilder::new().build(&keys[from], recipients)?)
}

fn main() -> DemoResult<()> {
    section(1, "Create ten identities");
    let start = Instant::now();
    let keys = (0..10)
        .map(|_| KeyPair::generate())
        .collect::<Result<Vec<_>, _>>()?;
    timing("10 x P-521 keygen", start.elapsed());

    let state: State = keys
        .iter()
        .enumerate()
        .map(|(i, kp)| (kp.identity().clone(), i as u64))
        .collect();
    for (i, kp) in keys.iter().enumerate() {
        let label = format!("id{i} ({})", kp.identity().fingerprint());
        info(&label, &state.balance_of(kp.identity()).to_string());
    }

    section(2, "id9 pays id2 three coins");
    let tx = pay(&keys, 9, &[(2, 3)])?;
    info("spend", &format!("{:?}", tx.spend.values().collect::<Vec<_>>()));
    verdict(&state, &tx);

    section(3, "id9 pays id2 three coins and id4 one coin");
    let tx = pay(&keys, 9, &[(2, 3), (4, 1)])?;
    info("spend", &format!("{:?}", tx.spend.values().collect::<Vec<_>>()));
    verdict(&state, &tx);

    section(4, "id6 tries to spend twelve");
    let tx = pay(&keys, 6, &[(1, 12)])?;
    verdict(&state, &tx);

    section(5, "Wire form");
    println!("{DIM}{}{RESET}", pay(&keys, 9, &[(2, 3)])?.to_json_pretty()?);

    Ok(())
}
