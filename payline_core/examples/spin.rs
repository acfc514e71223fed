use payline_core::{spin_once, Machine, ProvablyFairRng};

fn main() {
    // Example end-to-end spin on the reference machine
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let nonce = 1u64;
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    let machine = Machine::reference();
    let outcome = spin_once(&rng, &machine, 4, 10);
    print!("{}", outcome.grid);
    println!(
        "server_seed_hash={} winnings={} lines={:?}",
        rng.server_seed_hash_hex(),
        outcome.result.winnings,
        outcome.result.winning_lines
    );
}
