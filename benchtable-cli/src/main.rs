fn main() -> anyhow::Result<()> {
    benchtable_cli::run()
}
