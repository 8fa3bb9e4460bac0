use chrono::Local;
use clap::{Parser, Subcommand};
use merkle_proof::{
  Error, HashAlgorithm, HashTree, MerkleTree, Proof, ProofBuilder, ProofVerifier, Result, sample_transactions,
};
use rand::Rng;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod stat;

#[derive(Parser)]
#[command(name = "merkle-proof")]
#[command(about = "Build and verify Merkle inclusion proofs for transactions")]
struct Args {
  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  /// Hash function used to build the tree and fold proofs
  #[arg(long, default_value = "sha256", global = true)]
  hash: HashAlgorithm,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build a tree over the given transactions and print the proof for one of them
  Prove {
    /// Transaction to prove
    #[arg(long)]
    leaf: String,

    /// Write the encoded proof to this file
    #[arg(long)]
    out: Option<PathBuf>,

    /// All transactions of the block, in order
    #[arg(required = true)]
    leaves: Vec<String>,
  },

  /// Check an encoded proof against a known root
  Verify {
    #[arg(long)]
    leaf: String,

    /// File holding the encoded proof
    #[arg(long)]
    proof: PathBuf,

    /// Expected root hash in hex
    #[arg(long)]
    root: String,
  },

  /// Time proof construction and verification over growing trees
  Bench {
    /// Output directory for benchmark reports
    #[arg(index = 1, default_value = ".")]
    dir: PathBuf,

    /// Largest number of transactions
    #[arg(long, default_value_t = 1 << 16)]
    max_n: usize,

    /// Proofs measured per tree size
    #[arg(long, default_value_t = 100)]
    samples: usize,
  },
}

fn main() -> Result<()> {
  let args = Args::parse();

  let filter = match args.verbose {
    0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    1 => EnvFilter::new("debug"),
    _ => EnvFilter::new("trace"),
  };
  let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
  tracing_subscriber::registry().with(filter).with(layer).init();

  match args.command {
    Command::Prove { leaf, out, leaves } => prove(args.hash, &leaf, out.as_deref(), leaves),
    Command::Verify { leaf, proof, root } => verify(args.hash, &leaf, &proof, &root),
    Command::Bench { dir, max_n, samples } => bench(args.hash, &dir, max_n, samples),
  }
}

fn prove(hash: HashAlgorithm, leaf: &str, out: Option<&Path>, leaves: Vec<String>) -> Result<()> {
  let tree = MerkleTree::new(&hash, leaves);
  info!("built {hash} tree over {} transactions, height {}", tree.size(), tree.height());

  let proof = ProofBuilder::new(&tree).build(leaf.as_bytes())?;
  let root = tree.root_hash().map(hex::encode).unwrap_or_default();
  println!("root:  {root}");
  println!("proof: {proof}");

  if let Some(path) = out {
    let bytes = proof.to_bytes()?;
    fs::write(path, &bytes)?;
    info!("wrote {} steps ({} bytes) to {}", proof.len(), bytes.len(), path.display());
  }
  Ok(())
}

fn verify(hash: HashAlgorithm, leaf: &str, path: &Path, root: &str) -> Result<()> {
  let expected = hex::decode(root).map_err(|e| Error::InvalidData(format!("root is not hex: {e}")))?;
  let bytes = fs::read(path)?;
  debug!("read {} bytes of proof from {}", bytes.len(), path.display());

  let proof = Proof::from_bytes(&bytes)?;
  ProofVerifier::new(hash).check(leaf.as_bytes(), &proof, &expected)?;
  println!("OK: {leaf} is included under root {root}");
  Ok(())
}

fn bench(hash: HashAlgorithm, dir: &Path, max_n: usize, samples: usize) -> Result<()> {
  let id = Local::now().format("%Y%m%d%H%M%S").to_string();
  create_dir_all(dir)?;
  info!("working directory: {}", dir.display());

  let mut rng = rand::rng();
  let verifier = ProofVerifier::new(hash);
  let mut builds = stat::Report::new();
  let mut verifies = stat::Report::new();
  let mut n = 2;
  while n <= max_n {
    let tree = MerkleTree::new(&hash, sample_transactions(n));
    let builder = ProofBuilder::new(&tree);
    let root = tree.root_hash().unwrap_or_default();
    for _ in 0..samples {
      let i = rng.random_range(0..n);
      let leaf = &tree.leaves()[i];

      let t0 = Instant::now();
      let proof = builder.build_at(i)?;
      let t1 = Instant::now();
      let computed = verifier.verify(leaf, &proof)?;
      let t2 = Instant::now();

      if computed != root {
        return Err(Error::RootMismatch { computed, expected: root.to_vec() });
      }
      builds.add(n, t1 - t0);
      verifies.add(n, t2 - t1);
    }
    println!("  n={n}: build {}; verify {}", builds.single(n), verifies.single(n));
    n *= 2;
  }

  for (name, report) in [("build", &builds), ("verify", &verifies)] {
    let path = dir.join(format!("{id}-{hash}-{name}.csv"));
    report.save_to_csv(&path)?;
    println!("==> {}", path.to_string_lossy());
  }
  Ok(())
}
