fn main() -> anyhow::Result<()> {
    lockguard_lib::main()
}
