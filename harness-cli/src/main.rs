fn main() -> anyhow::Result<()> {
    libcbench_cli::main()
}
