fn main() -> anyhow::Result<()> {
    env_logger::init();

    audience_permissions::run(std::env::args().skip(1))
}
