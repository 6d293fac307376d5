use dice_dist::{common::Float, Dist, Spec};
use std::io::{self, BufRead, Write};

const BAR_WIDTH: usize = 60;

fn report(spec: &Spec, dist: &Dist, out: &mut impl Write) -> io::Result<()> {
    let total = dist.total_ways() as Float;
    let max_ways = dist.ways().iter().copied().max().unwrap_or(0);

    let (mean, m2) = dist.iter().fold((0.0, 0.0), |(mean, m2), (sum, ways)| {
        let p = ways as Float / total;
        let sum = sum as Float;
        (mean + p * sum, m2 + p * sum * sum)
    });
    let var = m2 - mean * mean;

    writeln!(out, "Distribution for: {}", spec)?;
    writeln!(out, "Total outcomes: {}", dist.total_ways())?;
    writeln!(
        out,
        "Mean: {:.4} | Var: {:.4} | StdDev: {:.4}",
        mean,
        var,
        var.sqrt()
    )?;
    writeln!(out, "sum | ways       | prob        | bar")?;
    for (sum, ways) in dist.iter() {
        let len = if max_ways == 0 {
            0
        } else {
            ((ways as Float * BAR_WIDTH as Float / max_ways as Float).round() as usize).min(BAR_WIDTH)
        };
        writeln!(
            out,
            "{:>3} | {:>10} | {:>11.8} | {}",
            sum,
            ways,
            dist.probability(sum),
            "#".repeat(len)
        )?;
    }
    Ok(())
}

fn run(line: &str, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let spec: Spec = line.parse()?;
    let dist = dice_dist::distribution(&spec)?;
    report(&spec, &dist, out)?;
    let rolled = dice_dist::roll(&spec, rand::thread_rng())?;
    writeln!(out, "roll({}) = {}", spec, rolled)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            let mut out = stdout.lock();
            if let Err(why) = run(&line, &mut out) {
                eprintln!("Error: {}", why);
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
