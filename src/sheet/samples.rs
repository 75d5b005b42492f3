//! Starter data for a fresh library

/// Category name, pinned, and `(name, content)` commands
pub type SampleCategory = (&'static str, bool, &'static [(&'static str, &'static str)]);

pub const SAMPLES: &[SampleCategory] = &[
    (
        "Docker",
        true,
        &[
            ("Enter running container", "docker exec -it [container] /bin/bash"),
            ("List all containers", "docker ps -a"),
            ("Prune unused resources", "docker system prune -a"),
            ("Start services (Compose)", "docker-compose up -d"),
        ],
    ),
    (
        "Git",
        true,
        &[
            ("Status", "git status"),
            ("Commit changes", "git commit -m \"[message]\""),
            ("Push to remote", "git push origin [branch]"),
            ("Pull latest", "git pull origin [branch]"),
        ],
    ),
    ("OpenSSL", false, &[]),
];
