//! Command-line driver: load an NFA, determinize, minimize, then test each
//! word for acceptance.

use formlang::{determinize, read_automaton};
use log::info;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <automaton-file> <word>...", args[0]);
        process::exit(1);
    }

    let nfa = match read_automaton(&args[1]) {
        Ok(nfa) => nfa,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    println!("input automaton:");
    print!("{nfa}");

    let dfa = determinize(&nfa);
    info!("determinized automaton has {} states", dfa.num_states());

    let minimal = dfa.minimize();
    println!();
    println!("minimal automaton:");
    print!("{minimal}");

    println!();
    for word in &args[2..] {
        let verdict = if minimal.run(word) {
            "accepted"
        } else {
            "rejected"
        };
        println!("{word}: {verdict}");
    }
}
