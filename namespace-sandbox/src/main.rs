fn main() {
    devtools_namespace_sandbox::run_main();
}
